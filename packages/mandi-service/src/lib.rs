pub mod categories;
pub mod category_page;
pub mod products;
pub mod ratings;
pub mod time_serde;

mod error;

pub use categories::CategoriesResponse;
pub use category_page::{CategoryPageRequest, CategoryPageResponse, PageInfo};
pub use error::{Error, Result};
pub use products::{ProductQueryRequest, ProductQueryResponse, ProductView};

use mandi_config::Config;
use mandi_storage::db::Db;

/// The request-scoped catalog query pipeline. Stateless between requests;
/// both underlying collections are read-only from here.
pub struct CatalogService {
	pub cfg: Config,
	pub db: Db,
}
impl CatalogService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db }
	}
}
