use std::sync::Arc;

use mandi_service::CatalogService;
use mandi_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<CatalogService>,
}
impl AppState {
	pub async fn new(config: mandi_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let service = CatalogService::new(config, db);

		Ok(Self { service: Arc::new(service) })
	}
}
