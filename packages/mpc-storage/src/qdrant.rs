use std::time::Duration;

use qdrant_client::{
	Qdrant, QdrantError,
	qdrant::{CountPointsBuilder, Filter, Query, QueryPointsBuilder},
};

use crate::{BoxFuture, CardDocument, CardFilter, CardIndex, Error, Result, SortOrder, filter};

pub struct IndexStore {
	pub client: Qdrant,
	pub collection: String,
	pub scan_batch_size: u32,
}
impl IndexStore {
	pub fn new(cfg: &mpc_config::Index) -> Result<Self> {
		let client = Qdrant::from_url(&cfg.url)
			.api_key(cfg.api_key.clone())
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.build()?;

		Ok(Self {
			client,
			collection: cfg.collection.clone(),
			scan_batch_size: cfg.scan_batch_size.max(1),
		})
	}

	pub async fn collection_exists(&self) -> Result<bool> {
		self.client
			.collection_exists(self.collection.clone())
			.await
			.map_err(|err| self.translate(err))
	}

	pub async fn health(&self) -> bool {
		match self.client.health_check().await {
			Ok(_) => true,
			Err(err) => {
				tracing::warn!(
					error = %err,
					collection = %self.collection,
					"Index health check failed."
				);

				false
			},
		}
	}

	pub async fn scan_documents(
		&self,
		card_filter: &CardFilter,
		order: SortOrder,
	) -> Result<Vec<CardDocument>> {
		let qdrant_filter = filter::to_qdrant_filter(card_filter);
		let batch = u64::from(self.scan_batch_size);
		let mut offset = 0_u64;
		let mut out = Vec::new();

		loop {
			let (docs, fetched) = self.query_window(&qdrant_filter, order, offset, batch).await?;

			out.extend(docs);

			if fetched < batch {
				break;
			}

			offset += fetched;
		}

		tracing::debug!(collection = %self.collection, hits = out.len(), "Index scan finished.");

		Ok(out)
	}

	pub async fn count_documents(&self, card_filter: &CardFilter) -> Result<u64> {
		let request = CountPointsBuilder::new(self.collection.clone())
			.filter(filter::to_qdrant_filter(card_filter))
			.exact(true);
		let response = self.client.count(request).await.map_err(|err| self.translate(err))?;

		Ok(response.result.map(|result| result.count).unwrap_or(0))
	}

	pub async fn page_documents(
		&self,
		card_filter: &CardFilter,
		order: SortOrder,
		offset: u64,
		limit: u64,
	) -> Result<Vec<CardDocument>> {
		if limit == 0 {
			return Ok(Vec::new());
		}

		let qdrant_filter = filter::to_qdrant_filter(card_filter);
		let (docs, _) = self.query_window(&qdrant_filter, order, offset, limit).await?;

		Ok(docs)
	}

	async fn query_window(
		&self,
		qdrant_filter: &Filter,
		order: SortOrder,
		offset: u64,
		limit: u64,
	) -> Result<(Vec<CardDocument>, u64)> {
		let request = QueryPointsBuilder::new(self.collection.clone())
			.query(Query::new_order_by(order.to_order_by()))
			.filter(qdrant_filter.clone())
			.with_payload(true)
			.offset(offset)
			.limit(limit);
		let response = self.client.query(request).await.map_err(|err| self.translate(err))?;
		let fetched = response.result.len() as u64;
		let mut docs = Vec::with_capacity(response.result.len());

		for point in response.result {
			match CardDocument::from_payload(&point.payload) {
				Ok(doc) => docs.push(doc),
				Err(err) => {
					tracing::warn!(
						error = %err,
						collection = %self.collection,
						"Skipping undecodable card document."
					);
				},
			}
		}

		Ok((docs, fetched))
	}

	fn translate(&self, err: QdrantError) -> Error {
		translate_error(&self.collection, err)
	}
}
impl CardIndex for IndexStore {
	fn name(&self) -> &str {
		&self.collection
	}

	fn exists(&self) -> BoxFuture<'_, Result<bool>> {
		Box::pin(self.collection_exists())
	}

	fn ping(&self) -> BoxFuture<'_, bool> {
		Box::pin(self.health())
	}

	fn scan<'a>(
		&'a self,
		filter: &'a CardFilter,
		order: SortOrder,
	) -> BoxFuture<'a, Result<Vec<CardDocument>>> {
		Box::pin(self.scan_documents(filter, order))
	}

	fn count<'a>(&'a self, filter: &'a CardFilter) -> BoxFuture<'a, Result<u64>> {
		Box::pin(self.count_documents(filter))
	}

	fn page<'a>(
		&'a self,
		filter: &'a CardFilter,
		order: SortOrder,
		offset: u64,
		limit: u64,
	) -> BoxFuture<'a, Result<Vec<CardDocument>>> {
		Box::pin(self.page_documents(filter, order, offset, limit))
	}
}

pub fn translate_error(collection: &str, err: QdrantError) -> Error {
	let message = err.to_string();

	if is_connection_failure(&message) {
		tracing::warn!(error = %message, collection, "Search index unreachable.");

		return Error::ConnectionTimedOut;
	}
	if is_missing_collection(&message) {
		return Error::IndexNotFound { index: collection.to_string() };
	}

	Error::from(err)
}

fn is_connection_failure(message: &str) -> bool {
	let message = message.to_lowercase();

	[
		"timed out",
		"timeout",
		"deadline",
		"unavailable",
		"transport error",
		"connection refused",
		"tcp connect error",
		"broken pipe",
	]
	.iter()
	.any(|needle| message.contains(needle))
}

fn is_missing_collection(message: &str) -> bool {
	let message = message.to_lowercase();

	message.contains("collection")
		&& (message.contains("doesn't exist") || message.contains("not found"))
}
