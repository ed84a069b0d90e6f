use serde_json::{Map, Value};

use crate::{Error, Result, SourceCatalog};

/// Client-supplied sizes are in megabytes; the index stores bytes.
pub const BYTES_PER_SIZE_UNIT: i64 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchSettings {
	pub fuzzy_search: bool,
	pub sources: Vec<String>,
	pub min_dpi: i64,
	pub max_dpi: i64,
	/// Bytes.
	pub max_size: i64,
}
impl SearchSettings {
	pub fn from_json_body(body: &Value, catalog: &SourceCatalog) -> Result<Self> {
		let search_settings = required_object(as_object(body, "request body")?, "searchSettings")?;
		let search_type = required_object(search_settings, "searchTypeSettings")?;
		let source_settings = required_object(search_settings, "sourceSettings")?;
		let filter_settings = required_object(search_settings, "filterSettings")?;
		let fuzzy_search = matches!(search_type.get("fuzzySearch"), Some(Value::Bool(true)));
		let toggles = read_source_toggles(source_settings)?;
		let sources = enabled_sources(&toggles, catalog);
		let min_dpi = required_integer(filter_settings, "minimumDPI")?;
		let max_dpi = required_integer(filter_settings, "maximumDPI")?;
		let max_size = required_integer(filter_settings, "maximumSize")?
			.checked_mul(BYTES_PER_SIZE_UNIT)
			.ok_or_else(|| Error::malformed("filterSettings.maximumSize is out of range."))?;

		Ok(Self { fuzzy_search, sources, min_dpi, max_dpi, max_size })
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceToggle {
	pub id: Option<i64>,
	pub enabled: bool,
}

/// Keeps the enabled toggles whose identifier resolves in `catalog`, in input order.
pub fn enabled_sources(toggles: &[SourceToggle], catalog: &SourceCatalog) -> Vec<String> {
	toggles
		.iter()
		.filter(|toggle| toggle.enabled)
		.filter_map(|toggle| toggle.id.and_then(|id| catalog.resolve(id)))
		.map(str::to_string)
		.collect()
}

fn read_source_toggles(source_settings: &Map<String, Value>) -> Result<Vec<SourceToggle>> {
	let entries = match source_settings.get("sources") {
		None => return Err(missing_key("sourceSettings.sources")),
		Some(Value::Null) => return Ok(Vec::new()),
		Some(Value::Array(entries)) => entries,
		Some(_) => return Err(Error::malformed("sourceSettings.sources must be a list.")),
	};
	let mut toggles = Vec::with_capacity(entries.len());

	for entry in entries {
		let Some([id, enabled]) = entry.as_array().map(Vec::as_slice) else {
			return Err(Error::malformed(
				"sourceSettings.sources entries must be [source, enabled] pairs.",
			));
		};

		toggles.push(SourceToggle { id: id.as_i64(), enabled: is_truthy(enabled) });
	}

	Ok(toggles)
}

/// `false`, `null`, zero and empty strings, lists or objects are off; everything else is on.
fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(flag) => *flag,
		Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
		Value::String(text) => !text.is_empty(),
		Value::Array(items) => !items.is_empty(),
		Value::Object(fields) => !fields.is_empty(),
	}
}

pub(crate) fn as_object<'a>(value: &'a Value, label: &str) -> Result<&'a Map<String, Value>> {
	value.as_object().ok_or_else(|| Error::malformed(format!("{label} must be an object.")))
}

fn required_object<'a>(
	parent: &'a Map<String, Value>,
	key: &str,
) -> Result<&'a Map<String, Value>> {
	match parent.get(key) {
		Some(value) => as_object(value, key),
		None => Err(missing_key(key)),
	}
}

fn required_integer(parent: &Map<String, Value>, key: &str) -> Result<i64> {
	let value = parent.get(key).ok_or_else(|| missing_key(key))?;
	let parsed = match value {
		Value::Number(number) =>
			number.as_i64().or_else(|| number.as_f64().filter(|n| n.is_finite()).map(|n| n as i64)),
		Value::String(text) => text.trim().parse::<i64>().ok(),
		_ => None,
	};

	parsed.ok_or_else(|| Error::malformed(format!("{key} must be an integer.")))
}

fn missing_key(key: &str) -> Error {
	Error::malformed(format!("{key} is required."))
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use crate::{
		Error, SourceCatalog,
		settings::{SearchSettings, SourceToggle, enabled_sources},
	};

	fn catalog() -> SourceCatalog {
		SourceCatalog::new([(1, "a"), (2, "b"), (3, "c")])
	}

	fn body(sources: serde_json::Value) -> serde_json::Value {
		json!({
			"searchSettings": {
				"searchTypeSettings": { "fuzzySearch": false },
				"sourceSettings": { "sources": sources },
				"filterSettings": { "minimumDPI": 300, "maximumDPI": 600, "maximumSize": 30 }
			}
		})
	}

	#[test]
	fn enabled_sources_keeps_input_order_and_drops_the_rest() {
		let toggles = [
			SourceToggle { id: Some(3), enabled: true },
			SourceToggle { id: Some(1), enabled: false },
			SourceToggle { id: Some(99), enabled: true },
			SourceToggle { id: None, enabled: true },
			SourceToggle { id: Some(2), enabled: true },
		];

		assert_eq!(enabled_sources(&toggles, &catalog()), vec!["c", "b"]);
	}

	#[test]
	fn parses_full_settings() {
		let settings =
			SearchSettings::from_json_body(&body(json!([[2, true], [1, true]])), &catalog())
				.expect("Expected settings.");

		assert!(!settings.fuzzy_search);
		assert_eq!(settings.sources, vec!["b", "a"]);
		assert_eq!((settings.min_dpi, settings.max_dpi), (300, 600));
		assert_eq!(settings.max_size, 30_000_000);
	}

	#[test]
	fn enabled_flags_follow_truthiness() {
		let sources = json!([[1, 1], [2, 0], [3, "yes"], [2, ""], [2, null], [2, false]]);
		let settings = SearchSettings::from_json_body(&body(sources), &catalog())
			.expect("Expected settings.");

		assert_eq!(settings.sources, vec!["a", "c"]);
	}

	#[test]
	fn null_sources_mean_no_sources() {
		let settings = SearchSettings::from_json_body(&body(json!(null)), &catalog())
			.expect("Expected settings.");

		assert!(settings.sources.is_empty());
	}

	#[test]
	fn fuzzy_flag_requires_boolean_true() {
		for (flag, expected) in
			[(json!(true), true), (json!("true"), false), (json!(1), false), (json!(null), false)]
		{
			let mut payload = body(json!([]));

			payload["searchSettings"]["searchTypeSettings"]["fuzzySearch"] = flag;

			let settings =
				SearchSettings::from_json_body(&payload, &catalog()).expect("Expected settings.");

			assert_eq!(settings.fuzzy_search, expected);
		}
	}

	#[test]
	fn missing_filter_key_is_malformed() {
		let mut payload = body(json!([]));

		payload["searchSettings"]["filterSettings"]
			.as_object_mut()
			.expect("Expected object.")
			.remove("maximumDPI");

		let err = SearchSettings::from_json_body(&payload, &catalog())
			.expect_err("Expected malformed input.");

		assert!(matches!(err, Error::MalformedInput { .. }));
	}

	#[test]
	fn wrong_shapes_are_malformed() {
		for sources in [json!("1,2"), json!([[1]]), json!([1, 2])] {
			let err = SearchSettings::from_json_body(&body(sources), &catalog())
				.expect_err("Expected malformed input.");

			assert!(matches!(err, Error::MalformedInput { .. }));
		}

		let err = SearchSettings::from_json_body(&json!({ "queries": [] }), &catalog())
			.expect_err("Expected malformed input.");

		assert!(matches!(err, Error::MalformedInput { .. }));
	}

	#[test]
	fn integer_strings_are_accepted() {
		let mut payload = body(json!([]));

		payload["searchSettings"]["filterSettings"]["maximumSize"] = json!("5");

		let settings =
			SearchSettings::from_json_body(&payload, &catalog()).expect("Expected settings.");

		assert_eq!(settings.max_size, 5_000_000);
	}
}
