pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Unable to read configuration at {path:?}.")]
	ReadConfig { path: std::path::PathBuf, source: std::io::Error },
	#[error("Unable to parse configuration at {path:?}.")]
	ParseConfig { path: std::path::PathBuf, source: toml::de::Error },
	#[error("sources.{field} {value} is declared more than once.")]
	DuplicateSource { field: &'static str, value: String },
	#[error("{message}")]
	Validation { message: String },
}
