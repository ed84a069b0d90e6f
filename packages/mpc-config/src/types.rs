use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub index: Index,
	/// The source catalog. Request payloads refer to sources by `id`; the index stores `key`.
	#[serde(default)]
	pub sources: Vec<SourceEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Index {
	pub url: String,
	pub collection: String,
	pub api_key: Option<String>,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	/// Page size used while exhaustively scanning matches.
	#[serde(default = "default_scan_batch_size")]
	pub scan_batch_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceEntry {
	pub id: i64,
	pub key: String,
	#[serde(default)]
	pub name: String,
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_timeout_ms() -> u64 {
	10_000
}

fn default_scan_batch_size() -> u32 {
	1_000
}
