#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Unable to connect to the search index (timed out).")]
	ConnectionTimedOut,
	#[error("Search index {index} does not exist.")]
	IndexNotFound { index: String },
	#[error("Invalid document payload: {message}")]
	InvalidPayload { message: String },
	#[error(transparent)]
	Qdrant(#[from] Box<qdrant_client::QdrantError>),
}
impl From<qdrant_client::QdrantError> for Error {
	fn from(err: qdrant_client::QdrantError) -> Self {
		Self::Qdrant(Box::new(err))
	}
}
