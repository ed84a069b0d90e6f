use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};
use unicode_segmentation::UnicodeSegmentation;

/// Folds a card name or query into the form the index tokenizes.
///
/// Accents are stripped, a handful of ligatures are expanded, apostrophes are dropped so
/// possessives stay one word, and every other run of non-alphanumeric characters becomes a
/// single space.
pub fn to_searchable(input: &str) -> String {
	let mut folded = String::with_capacity(input.len());

	for ch in input.nfkd() {
		if is_combining_mark(ch) || is_apostrophe(ch) {
			continue;
		}

		match ch {
			'æ' | 'Æ' => folded.push_str("ae"),
			'œ' | 'Œ' => folded.push_str("oe"),
			'ß' => folded.push_str("ss"),
			'ø' | 'Ø' => folded.push('o'),
			'đ' | 'Đ' => folded.push('d'),
			'ł' | 'Ł' => folded.push('l'),
			ch if ch.is_alphanumeric() => folded.extend(ch.to_lowercase()),
			_ => folded.push(' '),
		}
	}

	folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits already-searchable text into the terms a full-text match must find.
pub fn search_terms(searchable: &str) -> Vec<&str> {
	searchable.unicode_words().collect()
}

fn is_apostrophe(ch: char) -> bool {
	matches!(ch, '\'' | '\u{2018}' | '\u{2019}' | '\u{02BC}' | '`')
}
