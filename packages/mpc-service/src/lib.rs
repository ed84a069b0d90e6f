pub mod browse;
pub mod catalog;
pub mod legacy;
pub mod query;
pub mod search;
pub mod settings;

mod error;

pub use browse::{NEW_CARDS_PAGE_SIZE, NEW_CARDS_WINDOW_DAYS, NewCardsPage};
pub use catalog::SourceCatalog;
pub use error::{Error, Result};
pub use legacy::{LegacySettings, parse_id_list};
pub use query::SearchQuery;
pub use search::SearchResults;
pub use settings::{SearchSettings, SourceToggle};

use std::sync::Arc;

use mpc_config::Config;
use mpc_storage::CardIndex;

pub struct SearchService {
	pub index: Arc<dyn CardIndex>,
	pub catalog: SourceCatalog,
}
impl SearchService {
	pub fn new(index: Arc<dyn CardIndex>, catalog: SourceCatalog) -> Self {
		Self { index, catalog }
	}

	pub fn from_config(cfg: &Config, index: Arc<dyn CardIndex>) -> Self {
		Self::new(index, SourceCatalog::from_config(&cfg.sources))
	}

	pub async fn ping(&self) -> bool {
		self.index.ping().await
	}

	pub(crate) async fn ensure_index(&self) -> Result<()> {
		if self.index.exists().await? {
			return Ok(());
		}

		Err(Error::IndexUnavailable { index: self.index.name().to_string() })
	}
}
