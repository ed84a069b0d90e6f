use qdrant_client::qdrant::{
	Condition, DatetimeRange, Direction, Filter, MinShould, OrderBy, Range, Timestamp,
};
use time::OffsetDateTime;

use mpc_domain::CardType;

use crate::models::{
	FIELD_CARD_TYPE, FIELD_DATE, FIELD_DPI, FIELD_PRIORITY, FIELD_SEARCHQ, FIELD_SEARCHQ_KEYWORD,
	FIELD_SIZE, FIELD_SOURCE,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameField {
	Exact,
	Fuzzy,
}
impl NameField {
	pub fn payload_key(self) -> &'static str {
		match self {
			Self::Exact => FIELD_SEARCHQ_KEYWORD,
			Self::Fuzzy => FIELD_SEARCHQ,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextMatch {
	pub field: NameField,
	pub text: String,
}

/// Inclusive integer bounds. The index compares numbers as `f64`, so bounds beyond 2^53 are
/// rounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntRange {
	pub gte: Option<i64>,
	pub lte: Option<i64>,
}
impl IntRange {
	pub fn contains(&self, value: i64) -> bool {
		self.gte.is_none_or(|gte| value >= gte) && self.lte.is_none_or(|lte| value <= lte)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateWindow {
	pub from: OffsetDateTime,
	pub to: OffsetDateTime,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardFilter {
	pub card_type: Option<CardType>,
	/// Disjunction: the document's source must be one of these. An empty list matches nothing.
	pub sources: Option<Vec<String>>,
	pub dpi: Option<IntRange>,
	pub size: Option<IntRange>,
	pub date: Option<DateWindow>,
	pub text: Option<TextMatch>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
	PriorityDesc,
	DateDesc,
}
impl SortOrder {
	pub fn to_order_by(self) -> OrderBy {
		let key = match self {
			Self::PriorityDesc => FIELD_PRIORITY,
			Self::DateDesc => FIELD_DATE,
		};

		OrderBy { key: key.to_string(), direction: Some(Direction::Desc as i32), start_from: None }
	}
}

pub fn to_qdrant_filter(filter: &CardFilter) -> Filter {
	let mut must = Vec::new();

	if let Some(card_type) = filter.card_type {
		must.push(Condition::matches(FIELD_CARD_TYPE, card_type.as_str().to_string()));
	}
	if let Some(dpi) = filter.dpi {
		must.push(Condition::range(FIELD_DPI, to_range(dpi)));
	}
	if let Some(size) = filter.size {
		must.push(Condition::range(FIELD_SIZE, to_range(size)));
	}
	if let Some(window) = filter.date {
		must.push(Condition::datetime_range(
			FIELD_DATE,
			DatetimeRange {
				lt: None,
				gt: None,
				gte: Some(to_timestamp(window.from)),
				lte: Some(to_timestamp(window.to)),
			},
		));
	}
	if let Some(text) = filter.text.as_ref() {
		must.push(Condition::matches_text(text.field.payload_key(), text.text.clone()));
	}

	let min_should = filter.sources.as_ref().map(|sources| MinShould {
		min_count: 1,
		conditions: vec![Condition::matches(FIELD_SOURCE, sources.clone())],
	});

	Filter { must, should: Vec::new(), must_not: Vec::new(), min_should }
}

fn to_range(range: IntRange) -> Range {
	Range {
		lt: None,
		gt: None,
		gte: range.gte.map(|value| value as f64),
		lte: range.lte.map(|value| value as f64),
	}
}

fn to_timestamp(value: OffsetDateTime) -> Timestamp {
	Timestamp { seconds: value.unix_timestamp(), nanos: value.nanosecond() as i32 }
}
