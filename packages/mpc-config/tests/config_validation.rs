use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use mpc_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let table = root
		.as_table_mut()
		.and_then(|root| root.get_mut(section))
		.and_then(Value::as_table_mut)
		.expect("Sample config must include the requested section.");

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render sample config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("mpc_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> mpc_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = mpc_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

#[test]
fn sample_config_loads_and_normalizes_blank_api_key() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Sample config must load.");

	assert_eq!(cfg.index.collection, "cards");
	assert!(cfg.index.api_key.is_none());
	assert_eq!(cfg.sources.len(), 2);
	assert_eq!(cfg.sources[0].key, "chilli_axe");
}

#[test]
fn zero_timeout_is_rejected() {
	let err = load_payload(sample_with("index", "timeout_ms", Value::Integer(0)))
		.expect_err("Expected timeout validation error.");
	let message = err.to_string();

	assert!(
		message.contains("index.timeout_ms must be greater than zero."),
		"Unexpected error message: {message}"
	);
}

#[test]
fn zero_scan_batch_size_is_rejected() {
	let err = load_payload(sample_with("index", "scan_batch_size", Value::Integer(0)))
		.expect_err("Expected scan batch validation error.");

	assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn empty_collection_is_rejected() {
	let err = load_payload(sample_with("index", "collection", Value::String("  ".to_string())))
		.expect_err("Expected collection validation error.");

	assert!(err.to_string().contains("index.collection must be non-empty."));
}

#[test]
fn duplicate_source_ids_are_rejected() {
	let mut cfg: Config = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse config.");

	cfg.sources[1].id = cfg.sources[0].id;

	let err = mpc_config::validate(&cfg).expect_err("Expected duplicate id error.");

	assert!(matches!(err, Error::DuplicateSource { field: "id", .. }));
}

#[test]
fn duplicate_source_keys_are_rejected() {
	let mut cfg: Config = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse config.");

	cfg.sources[1].key = cfg.sources[0].key.clone();

	let err = mpc_config::validate(&cfg).expect_err("Expected duplicate key error.");

	assert_eq!(err.to_string(), "sources.key chilli_axe is declared more than once.");
}

#[test]
fn missing_file_reports_read_error() {
	let mut path = env::temp_dir();

	path.push("mpc_config_test_missing_file.toml");

	let err = mpc_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }));
}

#[test]
fn defaults_apply_when_optional_keys_are_absent() {
	let payload = r#"
[service]
http_bind = "127.0.0.1:0"

[index]
url        = "http://127.0.0.1:6334"
collection = "cards"
"#;
	let cfg = load_payload(payload.to_string()).expect("Minimal config must load.");

	assert_eq!(cfg.service.log_level, "info");
	assert_eq!(cfg.index.timeout_ms, 10_000);
	assert_eq!(cfg.index.scan_batch_size, 1_000);
	assert!(cfg.sources.is_empty());
}

#[test]
fn source_names_default_to_their_keys() {
	let payload = r#"
[service]
http_bind = "127.0.0.1:0"

[index]
url        = "http://127.0.0.1:6334"
collection = "cards"

[[sources]]
id   = 1
key  = " chilli_axe "
name = "Chilli_Axe"

[[sources]]
id  = 2
key = "hathwellcrisping"
"#;
	let cfg = load_payload(payload.to_string()).expect("Config must load.");

	assert_eq!(cfg.sources[0].key, "chilli_axe");
	assert_eq!(cfg.sources[0].name, "Chilli_Axe");
	assert_eq!(cfg.sources[1].name, "hathwellcrisping");
}
