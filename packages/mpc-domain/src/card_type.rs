use std::{fmt, str::FromStr};

/// Kind of printable image held by the index.
///
/// Variants are declared in the lexical order of their wire names so the derived `Ord` matches
/// ordering by name.
#[derive(
	Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
	Card,
	Cardback,
	Token,
}
impl CardType {
	pub const ALL: [CardType; 3] = [CardType::Card, CardType::Cardback, CardType::Token];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Card => "CARD",
			Self::Cardback => "CARDBACK",
			Self::Token => "TOKEN",
		}
	}
}
impl fmt::Display for CardType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for CardType {
	type Err = UnknownCardType;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|card_type| card_type.as_str() == value)
			.ok_or_else(|| UnknownCardType { value: value.to_string() })
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown card type {value:?}.")]
pub struct UnknownCardType {
	pub value: String,
}
