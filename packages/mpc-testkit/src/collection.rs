use std::{thread, time::Duration};

use qdrant_client::{
	Payload, Qdrant,
	qdrant::{
		CreateCollectionBuilder, CreateFieldIndexCollection, Distance, FieldType, PointStruct,
		UpsertPointsBuilder, VectorParamsBuilder,
	},
};
use time::format_description::well_known::Rfc3339;
use tokio::{runtime::Builder, time::timeout};
use uuid::Uuid;

use mpc_storage::{
	CardDocument,
	models::{
		FIELD_CARD_TYPE, FIELD_DATE, FIELD_DPI, FIELD_IDENTIFIER, FIELD_NAME, FIELD_PRIORITY,
		FIELD_SEARCHQ, FIELD_SEARCHQ_KEYWORD, FIELD_SIZE, FIELD_SOURCE,
	},
};

use crate::{Error, Result};

const PAYLOAD_INDEXES: [(&str, FieldType); 8] = [
	(FIELD_SOURCE, FieldType::Keyword),
	(FIELD_CARD_TYPE, FieldType::Keyword),
	(FIELD_PRIORITY, FieldType::Integer),
	(FIELD_DPI, FieldType::Integer),
	(FIELD_SIZE, FieldType::Integer),
	(FIELD_DATE, FieldType::Datetime),
	(FIELD_SEARCHQ, FieldType::Text),
	(FIELD_SEARCHQ_KEYWORD, FieldType::Text),
];

/// A throwaway card collection on a live Qdrant, deleted on cleanup or drop.
pub struct TestCollection {
	url: String,
	name: String,
	client: Qdrant,
	cleaned: bool,
}
impl TestCollection {
	pub async fn new(url: &str) -> Result<Self> {
		let client = Qdrant::from_url(url)
			.build()
			.map_err(|err| Error::Message(format!("Failed to build Qdrant client: {err}.")))?;
		let name = format!("mpc_test_{}", Uuid::new_v4().simple());

		client
			.create_collection(
				CreateCollectionBuilder::new(name.clone())
					.vectors_config(VectorParamsBuilder::new(1, Distance::Dot)),
			)
			.await?;

		for (field_name, field_type) in PAYLOAD_INDEXES {
			let request = CreateFieldIndexCollection {
				collection_name: name.clone(),
				wait: Some(true),
				field_name: field_name.to_string(),
				field_type: Some(field_type as i32),
				field_index_params: None,
				ordering: None,
			};

			client.create_field_index(request).await?;
		}

		Ok(Self { url: url.to_string(), name, client, cleaned: false })
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub async fn insert(&self, docs: &[CardDocument]) -> Result<()> {
		let mut points = Vec::with_capacity(docs.len());

		for doc in docs {
			let mut payload = Payload::new();

			payload.insert(FIELD_IDENTIFIER, doc.identifier.clone());
			payload.insert(FIELD_NAME, doc.name.clone());
			payload.insert(FIELD_SOURCE, doc.source.clone());
			payload.insert(FIELD_CARD_TYPE, doc.card_type.as_str());
			payload.insert(FIELD_PRIORITY, serde_json::Value::from(doc.priority));
			payload.insert(FIELD_DPI, serde_json::Value::from(doc.dpi));
			payload.insert(FIELD_SIZE, serde_json::Value::from(doc.size));
			payload.insert(FIELD_SEARCHQ, doc.searchq.clone());
			payload.insert(FIELD_SEARCHQ_KEYWORD, doc.searchq_keyword.clone());

			if let Some(date) = doc.date {
				let formatted = date
					.format(&Rfc3339)
					.map_err(|err| Error::Message(format!("Failed to format date: {err}.")))?;

				payload.insert(FIELD_DATE, formatted);
			}

			points.push(PointStruct::new(Uuid::new_v4().to_string(), vec![1.0_f32], payload));
		}

		self.client
			.upsert_points(UpsertPointsBuilder::new(self.name.clone(), points).wait(true))
			.await?;

		Ok(())
	}

	pub async fn cleanup(mut self) -> Result<()> {
		self.cleaned = true;

		delete_collection(&self.client, &self.name).await
	}
}
impl Drop for TestCollection {
	fn drop(&mut self) {
		if self.cleaned {
			return;
		}

		let url = self.url.clone();
		let name = self.name.clone();
		let cleanup_thread = thread::spawn(move || {
			let runtime = match Builder::new_current_thread().enable_all().build() {
				Ok(runtime) => runtime,
				Err(err) => {
					eprintln!("Test collection cleanup failed: {err}.");

					return;
				},
			};
			let client = match Qdrant::from_url(&url).build() {
				Ok(client) => client,
				Err(err) => {
					eprintln!("Test collection cleanup failed: {err}.");

					return;
				},
			};

			if let Err(err) = runtime.block_on(delete_collection(&client, &name)) {
				eprintln!("Test collection cleanup failed: {err}.");
			}
		});
		let _ = cleanup_thread.join();
	}
}

async fn delete_collection(client: &Qdrant, name: &str) -> Result<()> {
	timeout(Duration::from_secs(10), client.delete_collection(name.to_string()))
		.await
		.map_err(|_| Error::Message(format!("Timed out deleting Qdrant collection {name:?}.")))??;

	Ok(())
}
