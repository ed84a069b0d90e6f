use std::{
	collections::{BTreeMap, HashMap},
	sync::Arc,
	time::Instant,
};

use serde_json::Value;
use tokio::task::JoinSet;

use mpc_domain::{CardType, levenshtein, to_searchable};
use mpc_storage::{CardDocument, CardFilter, IntRange, NameField, SortOrder, TextMatch};

use crate::{Error, Result, SearchQuery, SearchService, SearchSettings};

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct SearchResults {
	pub results: BTreeMap<String, BTreeMap<CardType, Vec<String>>>,
}

impl SearchService {
	pub async fn search(self: &Arc<Self>, body: &Value) -> Result<SearchResults> {
		let settings = Arc::new(SearchSettings::from_json_body(body, &self.catalog)?);
		let queries = SearchQuery::list_from_json_body(body)?;
		let started = Instant::now();
		let query_count = queries.len();
		let mut tasks = JoinSet::new();

		for query in queries {
			let service = Arc::clone(self);
			let settings = Arc::clone(&settings);

			tasks.spawn(async move {
				let identifiers = service.execute(&query, &settings).await?;

				Ok::<_, Error>((query, identifiers))
			});
		}

		let mut out = SearchResults::default();

		while let Some(joined) = tasks.join_next().await {
			let (query, identifiers) = joined
				.map_err(|err| Error::Index { message: format!("Search task failed: {err}.") })??;

			out.results.entry(query.query).or_default().insert(query.card_type, identifiers);
		}

		tracing::info!(
			queries = query_count,
			fuzzy = settings.fuzzy_search,
			sources = settings.sources.len(),
			elapsed_ms = started.elapsed().as_millis() as u64,
			"Search batch finished."
		);

		Ok(out)
	}

	pub async fn execute(
		&self,
		query: &SearchQuery,
		settings: &SearchSettings,
	) -> Result<Vec<String>> {
		self.ensure_index().await?;

		let searchable = to_searchable(&query.query);

		if settings.sources.is_empty() || searchable.is_empty() {
			tracing::debug!(
				query = %query.query,
				card_type = %query.card_type,
				"Nothing to search for."
			);

			return Ok(Vec::new());
		}

		let filter = search_filter(query.card_type, &searchable, settings);
		let hits = self.index.scan(&filter, SortOrder::PriorityDesc).await?;
		let fuzzy_query = settings.fuzzy_search.then_some(searchable.as_str());
		let ranked = rank_hits(hits, &settings.sources, fuzzy_query);

		tracing::debug!(
			query = %query.query,
			card_type = %query.card_type,
			fuzzy = settings.fuzzy_search,
			hits = ranked.len(),
			"Query executed."
		);

		Ok(ranked.into_iter().map(|doc| doc.identifier).collect())
	}
}

pub(crate) fn name_field(fuzzy: bool) -> NameField {
	if fuzzy { NameField::Fuzzy } else { NameField::Exact }
}

fn search_filter(card_type: CardType, searchable: &str, settings: &SearchSettings) -> CardFilter {
	CardFilter {
		card_type: Some(card_type),
		sources: Some(settings.sources.clone()),
		dpi: Some(IntRange { gte: Some(settings.min_dpi), lte: Some(settings.max_dpi) }),
		size: Some(IntRange { gte: None, lte: Some(settings.max_size) }),
		date: None,
		text: Some(TextMatch {
			field: name_field(settings.fuzzy_search),
			text: searchable.to_string(),
		}),
	}
}

pub(crate) fn rank_hits(
	hits: Vec<CardDocument>,
	sources: &[String],
	fuzzy_query: Option<&str>,
) -> Vec<CardDocument> {
	let mut source_rank = HashMap::with_capacity(sources.len());

	for (rank, source) in sources.iter().enumerate() {
		source_rank.entry(source.as_str()).or_insert(rank);
	}

	let mut keyed: Vec<(usize, usize, CardDocument)> = hits
		.into_iter()
		.filter_map(|doc| {
			let Some(&rank) = source_rank.get(doc.source.as_str()) else {
				tracing::warn!(
					identifier = %doc.identifier,
					source = %doc.source,
					"Dropping hit from a source that was not requested."
				);

				return None;
			};
			let distance = fuzzy_query.map_or(0, |query| levenshtein(query, &doc.searchq));

			Some((rank, distance, doc))
		})
		.collect();

	// Stable, so ties keep the priority order of the scan.
	keyed.sort_by_key(|(rank, distance, _)| (*rank, *distance));

	keyed.into_iter().map(|(_, _, doc)| doc).collect()
}
