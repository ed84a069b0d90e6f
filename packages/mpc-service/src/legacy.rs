//! Form-based search used by older clients: one query per request, sources given as a
//! comma-separated list of keys.

use mpc_domain::{CardType, levenshtein, to_searchable};
use mpc_storage::{CardDocument, CardFilter, SortOrder, TextMatch};

use crate::{
	Error, Result, SearchService,
	search::{name_field, rank_hits},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacySettings {
	pub drive_order: Vec<String>,
	pub fuzzy_search: bool,
}
impl LegacySettings {
	pub fn from_form(drive_order: Option<&str>, fuzzy_search: Option<&str>) -> Self {
		Self {
			drive_order: drive_order
				.map(|order| order.split(',').map(str::to_string).collect())
				.unwrap_or_default(),
			fuzzy_search: fuzzy_search == Some("true"),
		}
	}
}

impl SearchService {
	/// Unlike [`SearchService::execute`] there are no DPI or size constraints, and fuzzy results
	/// are ordered by name distance first with source order only breaking ties.
	pub async fn legacy_search(
		&self,
		settings: &LegacySettings,
		query: &str,
		card_type: CardType,
	) -> Result<Vec<CardDocument>> {
		self.ensure_index().await?;

		let searchable = to_searchable(query);

		if searchable.is_empty() {
			return Ok(Vec::new());
		}

		let filter = CardFilter {
			card_type: Some(card_type),
			sources: Some(settings.drive_order.clone()),
			text: Some(TextMatch {
				field: name_field(settings.fuzzy_search),
				text: searchable.clone(),
			}),
			..CardFilter::default()
		};
		let hits = self.index.scan(&filter, SortOrder::PriorityDesc).await?;
		let mut ranked = rank_hits(hits, &settings.drive_order, None);

		if settings.fuzzy_search {
			ranked.sort_by_cached_key(|doc| levenshtein(&searchable, &doc.searchq));
		}

		tracing::info!(
			query,
			card_type = %card_type,
			fuzzy = settings.fuzzy_search,
			hits = ranked.len(),
			"Legacy search finished."
		);

		Ok(ranked)
	}

	/// Every cardback in the index, highest priority first.
	pub async fn all_cardbacks(&self) -> Result<Vec<CardDocument>> {
		self.ensure_index().await?;

		let filter = CardFilter { card_type: Some(CardType::Cardback), ..CardFilter::default() };

		Ok(self.index.scan(&filter, SortOrder::PriorityDesc).await?)
	}
}

/// `"[2, 4, 5]"` to `[2, 4, 5]`. Empty input and `"[]"` yield an empty list.
pub fn parse_id_list(input: &str) -> Result<Vec<i64>> {
	let inner = input.trim().trim_start_matches('[').trim_end_matches(']').trim();

	if inner.is_empty() {
		return Ok(Vec::new());
	}

	inner
		.split(',')
		.map(|item| {
			let item = item.trim();

			item.parse::<i64>()
				.map_err(|_| Error::malformed(format!("{item:?} is not an integer identifier.")))
		})
		.collect()
}
