use time::OffsetDateTime;

/// One catalog row in the fixed product projection. Most columns are
/// optional at the store level; defaults are applied at assembly time, not
/// here.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
	pub product_id: String,
	pub title: Option<String>,
	pub description: Option<String>,
	pub image_link: Option<String>,
	pub stock: Option<i64>,
	pub price: Option<f64>,
	pub discount: Option<f64>,
	pub sku: Option<String>,
	pub seller_id: Option<i64>,
	pub seller_name: Option<String>,
	pub location: Option<String>,
	pub category_name: Option<String>,
	pub sub_category_name: Option<String>,
	pub brand: Option<String>,
	pub original_price: Option<f64>,
	pub units: Option<String>,
	pub delivery_option: Option<String>,
	pub created_at: OffsetDateTime,
	pub final_price: Option<f64>,
}

/// A review's stored product id (any historical variant) and its rating.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredRating {
	pub product_id: String,
	pub rating: i32,
}
