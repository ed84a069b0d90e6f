pub mod card_type;
pub mod distance;
pub mod sanitize;

pub use card_type::{CardType, UnknownCardType};
pub use distance::levenshtein;
pub use sanitize::{search_terms, to_searchable};
