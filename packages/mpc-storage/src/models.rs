use std::collections::HashMap;

use qdrant_client::qdrant::{Value, value::Kind};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use mpc_domain::CardType;

use crate::{Error, Result};

pub const FIELD_IDENTIFIER: &str = "identifier";
pub const FIELD_NAME: &str = "name";
pub const FIELD_SOURCE: &str = "source";
pub const FIELD_CARD_TYPE: &str = "card_type";
pub const FIELD_PRIORITY: &str = "priority";
pub const FIELD_DPI: &str = "dpi";
pub const FIELD_SIZE: &str = "size";
pub const FIELD_SEARCHQ: &str = "searchq";
pub const FIELD_SEARCHQ_KEYWORD: &str = "searchq_keyword";
pub const FIELD_DATE: &str = "date";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CardDocument {
	pub identifier: String,
	pub name: String,
	pub source: String,
	pub card_type: CardType,
	pub priority: i64,
	pub dpi: i64,
	/// Bytes.
	pub size: i64,
	pub searchq: String,
	pub searchq_keyword: String,
	#[serde(with = "crate::time_serde", default)]
	pub date: Option<OffsetDateTime>,
}
impl CardDocument {
	pub fn from_payload(payload: &HashMap<String, Value>) -> Result<Self> {
		let identifier = required_string(payload, FIELD_IDENTIFIER)?;
		let source = required_string(payload, FIELD_SOURCE)?;
		let card_type = required_string(payload, FIELD_CARD_TYPE)?
			.parse::<CardType>()
			.map_err(|err| Error::InvalidPayload { message: err.to_string() })?;
		let date = match payload_string(payload, FIELD_DATE) {
			Some(raw) => Some(OffsetDateTime::parse(&raw, &Rfc3339).map_err(|err| {
				Error::InvalidPayload { message: format!("{FIELD_DATE} is not RFC 3339: {err}") }
			})?),
			None => None,
		};

		Ok(Self {
			identifier,
			name: payload_string(payload, FIELD_NAME).unwrap_or_default(),
			source,
			card_type,
			priority: payload_i64(payload, FIELD_PRIORITY).unwrap_or(0),
			dpi: payload_i64(payload, FIELD_DPI).unwrap_or(0),
			size: payload_i64(payload, FIELD_SIZE).unwrap_or(0),
			searchq: payload_string(payload, FIELD_SEARCHQ).unwrap_or_default(),
			searchq_keyword: payload_string(payload, FIELD_SEARCHQ_KEYWORD).unwrap_or_default(),
			date,
		})
	}
}

fn required_string(payload: &HashMap<String, Value>, key: &str) -> Result<String> {
	payload_string(payload, key)
		.ok_or_else(|| Error::InvalidPayload { message: format!("{key} is missing.") })
}

fn payload_string(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
	let value = payload.get(key)?;

	match &value.kind {
		Some(Kind::StringValue(text)) => Some(text.clone()),
		_ => None,
	}
}

fn payload_i64(payload: &HashMap<String, Value>, key: &str) -> Option<i64> {
	let value = payload.get(key)?;

	match &value.kind {
		Some(Kind::IntegerValue(value)) => Some(*value),
		Some(Kind::DoubleValue(value)) =>
			if value.fract() == 0.0 {
				Some(*value as i64)
			} else {
				None
			},
		_ => None,
	}
}
