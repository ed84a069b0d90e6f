mod collection;
mod error;
mod memory;

pub use collection::TestCollection;
pub use error::{Error, Result};
pub use memory::{MemoryIndex, MemoryIndexMode};

use std::env;

use mpc_domain::{CardType, to_searchable};
use mpc_storage::CardDocument;

pub fn env_qdrant_url() -> Option<String> {
	env::var("MPC_QDRANT_URL").ok()
}

/// A card document with searchable forms derived from `name` and neutral defaults elsewhere:
/// priority 0, 400 DPI, 1 MB, no date.
pub fn document(identifier: &str, name: &str, source: &str) -> CardDocument {
	let searchable = to_searchable(name);

	CardDocument {
		identifier: identifier.to_string(),
		name: name.to_string(),
		source: source.to_string(),
		card_type: CardType::Card,
		priority: 0,
		dpi: 400,
		size: 1_000_000,
		searchq: searchable.clone(),
		searchq_keyword: searchable,
		date: None,
	}
}
