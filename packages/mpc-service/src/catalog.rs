use std::collections::HashMap;

use mpc_config::SourceEntry;

#[derive(Debug, Clone, Default)]
pub struct SourceCatalog {
	keys: HashMap<i64, String>,
}
impl SourceCatalog {
	pub fn new<I, K>(entries: I) -> Self
	where
		I: IntoIterator<Item = (i64, K)>,
		K: Into<String>,
	{
		Self { keys: entries.into_iter().map(|(id, key)| (id, key.into())).collect() }
	}

	pub fn from_config(sources: &[SourceEntry]) -> Self {
		Self::new(sources.iter().map(|source| (source.id, source.key.clone())))
	}

	pub fn resolve(&self, id: i64) -> Option<&str> {
		self.keys.get(&id).map(String::as_str)
	}
}
