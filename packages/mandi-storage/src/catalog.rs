use mandi_domain::filter::{ProductFilter, escape_like};
use sqlx::{Postgres, QueryBuilder};

use crate::{Result, db::Db, models::ProductRow};

/// The fixed projection every product query selects. Callers never get more
/// columns than this.
const PRODUCT_COLUMNS: &str = "\
product_id, title, description, image_link, stock, price, discount, sku, seller_id, seller_name, \
location, category_name, sub_category_name, brand, original_price, units, delivery_option, \
created_at, final_price";

/// Fetch one page of products matching `filter`, in store-default order.
/// `limit = 0` means unbounded.
pub async fn fetch_page(
	db: &Db,
	filter: &ProductFilter,
	offset: i64,
	limit: i64,
) -> Result<Vec<ProductRow>> {
	let mut builder = QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));

	push_predicate(&mut builder, filter);
	push_page(&mut builder, offset, limit);

	let rows = builder.build_query_as().fetch_all(&db.pool).await?;

	Ok(rows)
}

/// Distinct category names in use by active, non-draft products, trimmed
/// and sorted.
pub async fn distinct_categories(db: &Db) -> Result<Vec<String>> {
	let names: Vec<String> = sqlx::query_scalar(
		"\
SELECT DISTINCT category_name
FROM products
WHERE is_active AND NOT is_draft AND category_name IS NOT NULL",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(tidy_names(names))
}

/// Fetch one page of a category listing, optionally narrowed to an exact
/// subcategory.
pub async fn fetch_category_page(
	db: &Db,
	category: &str,
	subcategory: Option<&str>,
	offset: i64,
	limit: i64,
) -> Result<Vec<ProductRow>> {
	let mut builder = QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));

	push_category_predicate(&mut builder, category, subcategory);
	push_page(&mut builder, offset, limit);

	let rows = builder.build_query_as().fetch_all(&db.pool).await?;

	Ok(rows)
}

/// Total number of products in a category listing, for pagination metadata.
pub async fn count_category(db: &Db, category: &str, subcategory: Option<&str>) -> Result<i64> {
	let mut builder = QueryBuilder::new("SELECT count(*) FROM products");

	push_category_predicate(&mut builder, category, subcategory);

	let count = builder.build_query_scalar().fetch_one(&db.pool).await?;

	Ok(count)
}

/// Distinct subcategory names within one category, trimmed and sorted.
pub async fn distinct_subcategories(db: &Db, category: &str) -> Result<Vec<String>> {
	let names: Vec<String> = sqlx::query_scalar(
		"\
SELECT DISTINCT sub_category_name
FROM products
WHERE is_active AND NOT is_draft AND category_name ILIKE $1 AND sub_category_name IS NOT NULL",
	)
	.bind(escape_like(category))
	.fetch_all(&db.pool)
	.await?;

	Ok(tidy_names(names))
}

fn push_predicate(builder: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
	builder.push(" WHERE is_active AND NOT is_draft");

	match filter {
		ProductFilter::All => {},
		ProductFilter::Category(name) => {
			// Escaped, so ILIKE is an exact case-insensitive comparison.
			builder.push(" AND category_name ILIKE ");
			builder.push_bind(escape_like(name));
		},
		ProductFilter::Text(text) => {
			let pattern = format!("%{}%", escape_like(text));

			builder.push(" AND (title ILIKE ");
			builder.push_bind(pattern.clone());
			builder.push(" OR description ILIKE ");
			builder.push_bind(pattern.clone());
			builder.push(" OR brand ILIKE ");
			builder.push_bind(pattern.clone());
			builder.push(" OR category_name ILIKE ");
			builder.push_bind(pattern.clone());
			builder.push(" OR sub_category_name ILIKE ");
			builder.push_bind(pattern);
			builder.push(")");
		},
	}
}

fn push_category_predicate(
	builder: &mut QueryBuilder<'_, Postgres>,
	category: &str,
	subcategory: Option<&str>,
) {
	builder.push(" WHERE is_active AND NOT is_draft AND category_name ILIKE ");
	builder.push_bind(escape_like(category));

	if let Some(subcategory) = subcategory {
		builder.push(" AND sub_category_name ILIKE ");
		builder.push_bind(escape_like(subcategory));
	}
}

fn push_page(builder: &mut QueryBuilder<'_, Postgres>, offset: i64, limit: i64) {
	if offset > 0 {
		builder.push(" OFFSET ");
		builder.push_bind(offset);
	}
	if limit > 0 {
		builder.push(" LIMIT ");
		builder.push_bind(limit);
	}
}

fn tidy_names(names: Vec<String>) -> Vec<String> {
	let mut tidied: Vec<String> = names
		.into_iter()
		.filter_map(|name| {
			let trimmed = name.trim();

			(!trimmed.is_empty()).then(|| trimmed.to_string())
		})
		.collect();

	tidied.sort();
	// Trimming can collapse values DISTINCT considered different.
	tidied.dedup();

	tidied
}
