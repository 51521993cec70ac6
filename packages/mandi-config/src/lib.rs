mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Catalog, Config, Postgres, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}

	for (label, value) in [
		("catalog.all_categories_label", &cfg.catalog.all_categories_label),
		("catalog.placeholder_image", &cfg.catalog.placeholder_image),
		("catalog.default_location", &cfg.catalog.default_location),
		("catalog.default_delivery_option", &cfg.catalog.default_delivery_option),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	// Per-call store budgets stay within a single-digit-second ceiling.
	for (label, value) in [
		("catalog.catalog_timeout_secs", cfg.catalog.catalog_timeout_secs),
		("catalog.ratings_timeout_secs", cfg.catalog.ratings_timeout_secs),
	] {
		if !(1..=10).contains(&value) {
			return Err(Error::Validation {
				message: format!("{label} must be between 1 and 10."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.catalog.all_categories_label = cfg.catalog.all_categories_label.trim().to_string();
	cfg.catalog.placeholder_image = cfg.catalog.placeholder_image.trim().to_string();
	cfg.catalog.default_location = cfg.catalog.default_location.trim().to_string();
	cfg.catalog.default_delivery_option = cfg.catalog.default_delivery_option.trim().to_string();
}
