use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub catalog: Catalog,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Catalog {
	/// Sentinel category value meaning "no category filter".
	#[serde(default = "default_all_categories_label")]
	pub all_categories_label: String,
	/// Image reference substituted when a product has none.
	#[serde(default = "default_placeholder_image")]
	pub placeholder_image: String,
	/// Location label substituted when a product has none.
	#[serde(default = "default_location")]
	pub default_location: String,
	/// Delivery-option label substituted when a product has none.
	#[serde(default = "default_delivery_option")]
	pub default_delivery_option: String,
	/// Per-call budget for catalog fetches; exceeding it fails the request.
	#[serde(default = "default_catalog_timeout_secs")]
	pub catalog_timeout_secs: u64,
	/// Per-call budget for rating aggregation; exceeding it degrades the
	/// page to zero ratings instead of failing it.
	#[serde(default = "default_ratings_timeout_secs")]
	pub ratings_timeout_secs: u64,
}
impl Default for Catalog {
	fn default() -> Self {
		Self {
			all_categories_label: default_all_categories_label(),
			placeholder_image: default_placeholder_image(),
			default_location: default_location(),
			default_delivery_option: default_delivery_option(),
			catalog_timeout_secs: default_catalog_timeout_secs(),
			ratings_timeout_secs: default_ratings_timeout_secs(),
		}
	}
}

fn default_all_categories_label() -> String {
	"All Categories".to_string()
}

fn default_placeholder_image() -> String {
	"/placeholder.svg?height=200&width=200".to_string()
}

fn default_location() -> String {
	"Delhi".to_string()
}

fn default_delivery_option() -> String {
	"Free Delivery Available".to_string()
}

fn default_catalog_timeout_secs() -> u64 {
	5
}

fn default_ratings_timeout_secs() -> u64 {
	3
}
