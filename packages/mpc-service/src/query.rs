use std::collections::BTreeSet;

use serde_json::Value;

use mpc_domain::CardType;

use crate::{Error, Result, settings::as_object};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SearchQuery {
	pub query: String,
	pub card_type: CardType,
}
impl SearchQuery {
	pub fn new(query: impl Into<String>, card_type: CardType) -> Self {
		Self { query: query.into(), card_type }
	}

	pub fn from_json_entry(entry: &Value) -> Option<Self> {
		let entry = entry.as_object()?;
		let query = entry.get("query")?.as_str().filter(|query| !query.is_empty())?;
		let card_type = entry.get("card_type")?.as_str()?.parse::<CardType>().ok()?;

		Some(Self::new(query, card_type))
	}

	pub fn list_from_json_body(body: &Value) -> Result<Vec<Self>> {
		let entries = match as_object(body, "request body")?.get("queries") {
			None => return Err(Error::MissingQueries),
			Some(Value::Null) => return Ok(Vec::new()),
			Some(Value::Array(entries)) => entries,
			Some(_) => return Err(Error::malformed("queries must be a list.")),
		};
		let unique: BTreeSet<Self> = entries.iter().filter_map(Self::from_json_entry).collect();

		Ok(unique.into_iter().collect())
	}
}
