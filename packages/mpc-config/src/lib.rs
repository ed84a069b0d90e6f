mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Index, Service, SourceEntry};

use std::{collections::HashSet, fs, path::Path};

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
	if cfg.index.url.trim().is_empty() {
		return Err(Error::Validation { message: "index.url must be non-empty.".to_string() });
	}
	if cfg.index.collection.trim().is_empty() {
		return Err(Error::Validation {
			message: "index.collection must be non-empty.".to_string(),
		});
	}
	if cfg.index.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "index.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.index.scan_batch_size == 0 {
		return Err(Error::Validation {
			message: "index.scan_batch_size must be greater than zero.".to_string(),
		});
	}

	let mut ids = HashSet::new();
	let mut keys = HashSet::new();

	for source in &cfg.sources {
		if source.key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("sources.key must be non-empty (id {}).", source.id),
			});
		}
		if !ids.insert(source.id) {
			return Err(Error::DuplicateSource { field: "id", value: source.id.to_string() });
		}
		if !keys.insert(source.key.as_str()) {
			return Err(Error::DuplicateSource { field: "key", value: source.key.clone() });
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.index.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.index.api_key = None;
	}

	for source in &mut cfg.sources {
		source.key = source.key.trim().to_string();

		if source.name.trim().is_empty() {
			source.name = source.key.clone();
		}
	}
}
