pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Caller-visible failures. Index-layer errors are always translated into this vocabulary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Malformed request: {message}")]
	MalformedInput { message: String },
	#[error("Malformed request: queries must be specified.")]
	MissingQueries,
	#[error("Search index {index} does not exist yet. It is probably being rebuilt; retry soon.")]
	IndexUnavailable { index: String },
	#[error("Unable to connect to the search index (timed out).")]
	ConnectionTimedOut,
	#[error("Search index error: {message}")]
	Index { message: String },
}
impl Error {
	pub(crate) fn malformed(message: impl Into<String>) -> Self {
		Self::MalformedInput { message: message.into() }
	}
}

impl From<mpc_storage::Error> for Error {
	fn from(err: mpc_storage::Error) -> Self {
		match err {
			mpc_storage::Error::ConnectionTimedOut => Self::ConnectionTimedOut,
			mpc_storage::Error::IndexNotFound { index } => Self::IndexUnavailable { index },
			mpc_storage::Error::InvalidPayload { message } => Self::Index { message },
			mpc_storage::Error::Qdrant(inner) => Self::Index { message: inner.to_string() },
		}
	}
}
