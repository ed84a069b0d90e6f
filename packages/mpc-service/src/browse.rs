use serde::Serializer;
use time::{Duration, OffsetDateTime};

use mpc_storage::{CardDocument, CardFilter, DateWindow, SortOrder};

use crate::{Result, SearchService};

pub const NEW_CARDS_PAGE_SIZE: u64 = 6;
pub const NEW_CARDS_WINDOW_DAYS: i64 = 14;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NewCardsPage {
	#[serde(rename = "qty")]
	pub count: u64,
	/// Absent when `count` is zero.
	#[serde(rename = "hits", skip_serializing_if = "Option::is_none")]
	pub items: Option<Vec<CardDocument>>,
	#[serde(rename = "more", serialize_with = "serialize_flag")]
	pub has_more: bool,
}

impl SearchService {
	pub async fn list_new(&self, source_key: &str, page: u64) -> Result<NewCardsPage> {
		self.list_new_at(source_key, page, OffsetDateTime::now_utc()).await
	}

	pub async fn list_new_at(
		&self,
		source_key: &str,
		page: u64,
		now: OffsetDateTime,
	) -> Result<NewCardsPage> {
		self.ensure_index().await?;

		let filter = CardFilter {
			sources: Some(vec![source_key.to_string()]),
			date: Some(DateWindow { from: now - Duration::days(NEW_CARDS_WINDOW_DAYS), to: now }),
			..CardFilter::default()
		};
		let count = self.index.count(&filter).await?;
		let start = NEW_CARDS_PAGE_SIZE.saturating_mul(page);
		let end = start.saturating_add(NEW_CARDS_PAGE_SIZE);
		let items = if count > 0 {
			Some(self.index.page(&filter, SortOrder::DateDesc, start, NEW_CARDS_PAGE_SIZE).await?)
		} else {
			None
		};

		tracing::debug!(source = source_key, page, qty = count, "Listed new cards.");

		Ok(NewCardsPage { count, items, has_more: count > end })
	}
}

fn serialize_flag<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	serializer.serialize_str(if *value { "true" } else { "false" })
}
