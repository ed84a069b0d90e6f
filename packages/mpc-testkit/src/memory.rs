use std::sync::{
	Mutex,
	atomic::{AtomicUsize, Ordering},
};

use mpc_domain::search_terms;
use mpc_storage::{
	BoxFuture, CardDocument, CardFilter, CardIndex, Error, NameField, Result, SortOrder,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryIndexMode {
	Ready,
	/// The index reports that it does not exist.
	Missing,
	/// Every call fails the way an unreachable service does.
	Unreachable,
}

/// In-process [`CardIndex`] that evaluates filters the way the real index does: term and range
/// constraints are exact, and a text match requires every query term.
pub struct MemoryIndex {
	name: String,
	docs: Vec<CardDocument>,
	mode: Mutex<MemoryIndexMode>,
	scans: AtomicUsize,
}
impl MemoryIndex {
	pub fn new(docs: Vec<CardDocument>) -> Self {
		Self {
			name: "cards_memory".to_string(),
			docs,
			mode: Mutex::new(MemoryIndexMode::Ready),
			scans: AtomicUsize::new(0),
		}
	}

	pub fn with_mode(self, mode: MemoryIndexMode) -> Self {
		self.set_mode(mode);

		self
	}

	pub fn set_mode(&self, mode: MemoryIndexMode) {
		*self.mode.lock().unwrap_or_else(|err| err.into_inner()) = mode;
	}

	/// Number of scan requests served so far.
	pub fn scans(&self) -> usize {
		self.scans.load(Ordering::SeqCst)
	}

	fn mode(&self) -> MemoryIndexMode {
		*self.mode.lock().unwrap_or_else(|err| err.into_inner())
	}

	fn check_reachable(&self) -> Result<()> {
		match self.mode() {
			MemoryIndexMode::Unreachable => Err(Error::ConnectionTimedOut),
			MemoryIndexMode::Missing => Err(Error::IndexNotFound { index: self.name.clone() }),
			MemoryIndexMode::Ready => Ok(()),
		}
	}

	fn select(&self, filter: &CardFilter, order: SortOrder) -> Vec<CardDocument> {
		let mut hits: Vec<CardDocument> =
			self.docs.iter().filter(|doc| matches_filter(filter, doc)).cloned().collect();

		match order {
			SortOrder::PriorityDesc => hits.sort_by(|a, b| b.priority.cmp(&a.priority)),
			SortOrder::DateDesc => hits.sort_by(|a, b| b.date.cmp(&a.date)),
		}

		hits
	}
}
impl CardIndex for MemoryIndex {
	fn name(&self) -> &str {
		&self.name
	}

	fn exists(&self) -> BoxFuture<'_, Result<bool>> {
		let result = match self.mode() {
			MemoryIndexMode::Ready => Ok(true),
			MemoryIndexMode::Missing => Ok(false),
			MemoryIndexMode::Unreachable => Err(Error::ConnectionTimedOut),
		};

		Box::pin(async move { result })
	}

	fn ping(&self) -> BoxFuture<'_, bool> {
		let reachable = self.mode() != MemoryIndexMode::Unreachable;

		Box::pin(async move { reachable })
	}

	fn scan<'a>(
		&'a self,
		filter: &'a CardFilter,
		order: SortOrder,
	) -> BoxFuture<'a, Result<Vec<CardDocument>>> {
		self.scans.fetch_add(1, Ordering::SeqCst);

		let result = self.check_reachable().map(|()| self.select(filter, order));

		Box::pin(async move { result })
	}

	fn count<'a>(&'a self, filter: &'a CardFilter) -> BoxFuture<'a, Result<u64>> {
		let result = self.check_reachable().map(|()| {
			self.docs.iter().filter(|doc| matches_filter(filter, doc)).count() as u64
		});

		Box::pin(async move { result })
	}

	fn page<'a>(
		&'a self,
		filter: &'a CardFilter,
		order: SortOrder,
		offset: u64,
		limit: u64,
	) -> BoxFuture<'a, Result<Vec<CardDocument>>> {
		let result = self.check_reachable().map(|()| {
			self.select(filter, order)
				.into_iter()
				.skip(offset as usize)
				.take(limit as usize)
				.collect()
		});

		Box::pin(async move { result })
	}
}

fn matches_filter(filter: &CardFilter, doc: &CardDocument) -> bool {
	if filter.card_type.is_some_and(|card_type| card_type != doc.card_type) {
		return false;
	}
	if filter.sources.as_ref().is_some_and(|sources| !sources.contains(&doc.source)) {
		return false;
	}
	if filter.dpi.is_some_and(|range| !range.contains(doc.dpi)) {
		return false;
	}
	if filter.size.is_some_and(|range| !range.contains(doc.size)) {
		return false;
	}
	if let Some(window) = filter.date {
		match doc.date {
			Some(date) if date >= window.from && date <= window.to => {},
			_ => return false,
		}
	}
	if let Some(text) = filter.text.as_ref() {
		let field = match text.field {
			NameField::Exact => doc.searchq_keyword.as_str(),
			NameField::Fuzzy => doc.searchq.as_str(),
		};
		let field_terms = search_terms(field);
		let all_present = search_terms(&text.text).iter().all(|term| match text.field {
			NameField::Exact => field_terms.contains(term),
			NameField::Fuzzy => field_terms.iter().any(|candidate| candidate.contains(term)),
		});

		if !all_present {
			return false;
		}
	}

	true
}
