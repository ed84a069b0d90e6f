use std::sync::Arc;

use mpc_config::Config;
use mpc_service::SearchService;
use mpc_storage::IndexStore;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<SearchService>,
}
impl AppState {
	/// Builds the index client from `config`. No connection is made until the first request.
	pub fn new(config: &Config) -> color_eyre::Result<Self> {
		let store = IndexStore::new(&config.index)?;

		Ok(Self::from_service(SearchService::from_config(config, Arc::new(store))))
	}

	pub fn from_service(service: SearchService) -> Self {
		Self { service: Arc::new(service) }
	}
}
