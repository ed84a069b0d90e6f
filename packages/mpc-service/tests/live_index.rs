use std::sync::Arc;

use mpc_config::Index;
use mpc_domain::CardType;
use mpc_service::{Error, SearchQuery, SearchService, SearchSettings, SourceCatalog};
use mpc_storage::{CardDocument, IndexStore};
use mpc_testkit::{TestCollection, document};

fn index_config(url: &str, collection: &str) -> Index {
	Index {
		url: url.to_string(),
		collection: collection.to_string(),
		api_key: None,
		timeout_ms: 5_000,
		scan_batch_size: 2,
	}
}

#[tokio::test]
#[ignore = "Requires external Qdrant. Set MPC_QDRANT_URL to run."]
async fn ranks_hits_from_a_live_collection() {
	let Some(url) = mpc_testkit::env_qdrant_url() else {
		eprintln!("Skipping ranks_hits_from_a_live_collection; set MPC_QDRANT_URL to run.");

		return;
	};
	let collection = TestCollection::new(&url).await.expect("Failed to create collection.");

	collection
		.insert(&[
			CardDocument { priority: 3, ..document("b-bolt", "Lightning Bolt", "b") },
			CardDocument { priority: 1, ..document("a-bolt-1", "Lightning Bolt", "a") },
			CardDocument { priority: 2, ..document("a-bolt-2", "Lightning Bolt", "a") },
			CardDocument { dpi: 1_200, ..document("a-bolt-hires", "Lightning Bolt", "a") },
			document("a-helix", "Lightning Helix", "a"),
		])
		.await
		.expect("Failed to insert documents.");

	let store = IndexStore::new(&index_config(&url, collection.name()))
		.expect("Failed to build index store.");
	let service = SearchService::new(Arc::new(store), SourceCatalog::default());
	let settings = SearchSettings {
		fuzzy_search: false,
		sources: vec!["a".to_string(), "b".to_string()],
		min_dpi: 300,
		max_dpi: 600,
		max_size: 30_000_000,
	};
	let identifiers = service
		.execute(&SearchQuery::new("Lightning Bolt", CardType::Card), &settings)
		.await
		.expect("Expected search to succeed.");

	assert_eq!(identifiers, vec!["a-bolt-2", "a-bolt-1", "b-bolt"]);

	collection.cleanup().await.expect("Failed to clean up collection.");
}

#[tokio::test]
#[ignore = "Requires external Qdrant. Set MPC_QDRANT_URL to run."]
async fn missing_collection_is_unavailable() {
	let Some(url) = mpc_testkit::env_qdrant_url() else {
		eprintln!("Skipping missing_collection_is_unavailable; set MPC_QDRANT_URL to run.");

		return;
	};
	let store = IndexStore::new(&index_config(&url, "mpc_test_does_not_exist"))
		.expect("Failed to build index store.");
	let service = SearchService::new(Arc::new(store), SourceCatalog::default());
	let err = service.all_cardbacks().await.expect_err("Expected missing index.");

	assert!(matches!(err, Error::IndexUnavailable { .. }));
	assert!(service.ping().await);
}
