use std::{
	collections::{HashMap, HashSet},
	time::Duration,
};

use mandi_domain::{
	filter::{self, ProductFilter},
	product_id,
	rating::RatingSummary,
};
use mandi_storage::{catalog, models::ProductRow};
use tokio::time::timeout;
use tracing::warn;

use crate::{CatalogService, Error, Result};

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ProductQueryRequest {
	/// Free-text search term.
	#[serde(default)]
	pub q: String,
	/// Exact category name, or the configured sentinel meaning "no filter".
	#[serde(default)]
	pub category: String,
	/// Page size; zero means unbounded.
	#[serde(default)]
	pub limit: i64,
	#[serde(default)]
	pub offset: i64,
}

/// Flat transfer object for one catalog row plus its live rating summary.
/// Field names mirror the stored attributes; every optional attribute has
/// already been defaulted.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProductView {
	pub product_id: String,
	pub title: String,
	pub description: String,
	pub image_link: String,
	pub stock: i64,
	pub price: f64,
	pub discount: f64,
	#[serde(rename = "SKU")]
	pub sku: String,
	pub seller_id: i64,
	pub rating: f64,
	#[serde(rename = "reviewCount")]
	pub review_count: i64,
	pub seller_name: String,
	pub location: String,
	pub category_name: String,
	pub sub_category_name: String,
	pub brand: String,
	pub original_price: f64,
	pub units: String,
	pub delivery_option: String,
	#[serde(with = "crate::time_serde")]
	pub created_at: time::OffsetDateTime,
	pub final_price: f64,
}

#[derive(Debug, Clone)]
pub struct ProductQueryResponse {
	pub items: Vec<ProductView>,
	/// True when the review store could not be reached in time and every
	/// item's rating was defaulted to zero.
	pub ratings_degraded: bool,
}

impl CatalogService {
	/// Answer a catalog query: plan the filter, fetch one page, join live
	/// rating statistics, and shape the response.
	///
	/// Catalog data is mandatory: a store failure or timeout fails the
	/// request. Rating data is enrichment: a review-store failure degrades
	/// the page to zero ratings instead.
	pub async fn query_products(&self, req: ProductQueryRequest) -> Result<ProductQueryResponse> {
		if req.limit < 0 || req.offset < 0 {
			return Err(Error::InvalidArgument {
				message: "limit and offset must be zero or greater.".to_string(),
			});
		}

		let filter = self.resolve_filter(&req.q, &req.category).await?;
		let rows = timeout(
			self.catalog_budget(),
			catalog::fetch_page(&self.db, &filter, req.offset, req.limit),
		)
		.await
		.map_err(|_| Error::StoreUnavailable { message: "Catalog fetch timed out.".to_string() })??;
		let context = format!("filter={filter:?} offset={} limit={}", req.offset, req.limit);
		let (summaries, ratings_degraded) = self.degradable_summaries(&rows, &context).await;
		let items = rows.into_iter().map(|row| self.assemble_row(row, &summaries)).collect();

		Ok(ProductQueryResponse { items, ratings_degraded })
	}

	/// Decide between category filtering and free-text search. The distinct
	/// category list is only fetched when free text needs disambiguation,
	/// i.e. there is no explicit category to win outright.
	async fn resolve_filter(&self, q: &str, category: &str) -> Result<ProductFilter> {
		let label = self.cfg.catalog.all_categories_label.as_str();
		let trimmed_category = category.trim();
		let explicit_category = !trimmed_category.is_empty() && trimmed_category != label;
		let known_categories = if !explicit_category && !q.trim().is_empty() {
			timeout(self.catalog_budget(), catalog::distinct_categories(&self.db)).await.map_err(
				|_| Error::StoreUnavailable { message: "Category lookup timed out.".to_string() },
			)??
		} else {
			Vec::new()
		};

		Ok(filter::build_filter(q, category, label, &known_categories))
	}

	pub(crate) fn catalog_budget(&self) -> Duration {
		Duration::from_secs(self.cfg.catalog.catalog_timeout_secs)
	}

	/// Rating aggregation with the partial-failure policy applied: any
	/// error or timeout yields an empty map and a degraded flag, never a
	/// failed request.
	pub(crate) async fn degradable_summaries(
		&self,
		rows: &[ProductRow],
		context: &str,
	) -> (HashMap<String, RatingSummary>, bool) {
		let canonical_ids: HashSet<String> = rows
			.iter()
			.map(|row| product_id::canonicalize(&row.product_id))
			.filter(|id| !id.is_empty())
			.collect();
		let budget = Duration::from_secs(self.cfg.catalog.ratings_timeout_secs);

		match timeout(budget, crate::ratings::aggregate(&self.db, &canonical_ids)).await {
			Ok(Ok(summaries)) => (summaries, false),
			Ok(Err(err)) => {
				warn!(%context, error = %err, "Rating aggregation failed; serving zero ratings.");

				(HashMap::new(), true)
			},
			Err(_) => {
				warn!(%context, "Rating aggregation timed out; serving zero ratings.");

				(HashMap::new(), true)
			},
		}
	}

	/// Merge one catalog row with its rating summary and apply field
	/// defaults. Missing optional data can never fail a request here.
	pub(crate) fn assemble_row(
		&self,
		row: ProductRow,
		summaries: &HashMap<String, RatingSummary>,
	) -> ProductView {
		let canonical = product_id::canonicalize(&row.product_id);
		let summary = summaries
			.get(&canonical)
			.copied()
			.unwrap_or(RatingSummary { average_rating: 0.0, review_count: 0 });
		let price = row.price.unwrap_or(0.0);

		ProductView {
			product_id: row.product_id,
			title: row.title.unwrap_or_default(),
			description: row.description.unwrap_or_default(),
			image_link: non_empty(row.image_link)
				.unwrap_or_else(|| self.cfg.catalog.placeholder_image.clone()),
			stock: row.stock.unwrap_or(0),
			price,
			discount: row.discount.unwrap_or(0.0),
			sku: row.sku.unwrap_or_default(),
			seller_id: row.seller_id.unwrap_or(0),
			rating: summary.average_rating,
			review_count: summary.review_count,
			seller_name: row.seller_name.unwrap_or_default(),
			location: non_empty(row.location)
				.unwrap_or_else(|| self.cfg.catalog.default_location.clone()),
			category_name: row.category_name.unwrap_or_default(),
			sub_category_name: row.sub_category_name.unwrap_or_default(),
			brand: row.brand.unwrap_or_default(),
			original_price: row.original_price.unwrap_or(price),
			units: row.units.unwrap_or_default(),
			delivery_option: non_empty(row.delivery_option)
				.unwrap_or_else(|| self.cfg.catalog.default_delivery_option.clone()),
			created_at: row.created_at,
			final_price: row.final_price.unwrap_or(0.0),
		}
	}
}

fn non_empty(value: Option<String>) -> Option<String> {
	value.filter(|value| !value.trim().is_empty())
}
