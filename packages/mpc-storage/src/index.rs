use std::{future::Future, pin::Pin};

use crate::{CardDocument, CardFilter, Result, SortOrder};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait CardIndex
where
	Self: Send + Sync,
{
	fn name(&self) -> &str;

	fn exists(&self) -> BoxFuture<'_, Result<bool>>;

	fn ping(&self) -> BoxFuture<'_, bool>;

	/// Every document matching `filter`, in `order`. Not truncated.
	fn scan<'a>(
		&'a self,
		filter: &'a CardFilter,
		order: SortOrder,
	) -> BoxFuture<'a, Result<Vec<CardDocument>>>;

	fn count<'a>(&'a self, filter: &'a CardFilter) -> BoxFuture<'a, Result<u64>>;

	fn page<'a>(
		&'a self,
		filter: &'a CardFilter,
		order: SortOrder,
		offset: u64,
		limit: u64,
	) -> BoxFuture<'a, Result<Vec<CardDocument>>>;
}
