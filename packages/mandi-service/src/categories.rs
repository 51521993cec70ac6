use mandi_storage::catalog;
use tokio::time::timeout;

use crate::{CatalogService, Error, Result};

#[derive(Debug, Clone, serde::Serialize)]
pub struct CategoriesResponse {
	pub categories: Vec<String>,
}

impl CatalogService {
	/// Distinct category names currently in use by visible products.
	pub async fn categories(&self) -> Result<CategoriesResponse> {
		let categories = timeout(self.catalog_budget(), catalog::distinct_categories(&self.db))
			.await
			.map_err(|_| Error::StoreUnavailable {
				message: "Category lookup timed out.".to_string(),
			})??;

		Ok(CategoriesResponse { categories })
	}
}
