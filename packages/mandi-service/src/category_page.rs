use mandi_storage::catalog;
use tokio::time::timeout;

use crate::{CatalogService, Error, Result, products::ProductView};

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CategoryPageRequest {
	#[serde(default)]
	pub category: String,
	/// Exact subcategory, or empty/"all" for the whole category.
	#[serde(default)]
	pub subcategory: String,
	#[serde(default = "default_page_limit")]
	pub limit: i64,
	#[serde(default)]
	pub offset: i64,
}

fn default_page_limit() -> i64 {
	20
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
	pub limit: i64,
	pub offset: i64,
	pub total_pages: i64,
	pub current_page: i64,
	pub has_next: bool,
	pub has_prev: bool,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CategoryPageResponse {
	pub products: Vec<ProductView>,
	#[serde(rename = "totalCount")]
	pub total_count: i64,
	pub subcategories: Vec<String>,
	pub pagination: PageInfo,
	#[serde(skip)]
	pub ratings_degraded: bool,
}

impl CatalogService {
	/// Category landing page: one page of the category's products with
	/// rating statistics, the total count, and the subcategories available
	/// for narrowing.
	pub async fn category_page(&self, req: CategoryPageRequest) -> Result<CategoryPageResponse> {
		let category = req.category.trim().to_string();

		if category.is_empty() {
			return Err(Error::InvalidArgument { message: "category is required.".to_string() });
		}
		if req.limit < 0 || req.offset < 0 {
			return Err(Error::InvalidArgument {
				message: "limit and offset must be zero or greater.".to_string(),
			});
		}

		let subcategory = req.subcategory.trim();
		let subcategory =
			(!subcategory.is_empty() && !subcategory.eq_ignore_ascii_case("all"))
				.then_some(subcategory);
		let budget = self.catalog_budget();
		let unavailable =
			|message: &str| Error::StoreUnavailable { message: message.to_string() };

		let total_count =
			timeout(budget, catalog::count_category(&self.db, &category, subcategory))
				.await
				.map_err(|_| unavailable("Category count timed out."))??;
		let rows = timeout(
			budget,
			catalog::fetch_category_page(&self.db, &category, subcategory, req.offset, req.limit),
		)
		.await
		.map_err(|_| unavailable("Category fetch timed out."))??;
		let subcategories =
			timeout(budget, catalog::distinct_subcategories(&self.db, &category))
				.await
				.map_err(|_| unavailable("Subcategory lookup timed out."))??;

		let context =
			format!("category={category:?} offset={} limit={}", req.offset, req.limit);
		let (summaries, ratings_degraded) = self.degradable_summaries(&rows, &context).await;
		let products =
			rows.into_iter().map(|row| self.assemble_row(row, &summaries)).collect();
		let pagination = page_info(total_count, req.offset, req.limit);

		Ok(CategoryPageResponse {
			products,
			total_count,
			subcategories,
			pagination,
			ratings_degraded,
		})
	}
}

fn page_info(total_count: i64, offset: i64, limit: i64) -> PageInfo {
	let (total_pages, current_page, has_next) = if limit > 0 {
		(
			(total_count + limit - 1) / limit,
			offset / limit + 1,
			offset + limit < total_count,
		)
	} else {
		// Unbounded page: everything is page one.
		(i64::from(total_count > 0), 1, false)
	};

	PageInfo { limit, offset, total_pages, current_page, has_next, has_prev: offset > 0 }
}
