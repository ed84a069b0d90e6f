pub mod filter;
pub mod index;
pub mod models;
pub mod qdrant;
pub mod time_serde;

mod error;

pub use error::Error;
pub use filter::{CardFilter, DateWindow, IntRange, NameField, SortOrder, TextMatch};
pub use index::{BoxFuture, CardIndex};
pub use models::CardDocument;
pub use qdrant::IndexStore;

pub type Result<T, E = Error> = std::result::Result<T, E>;
