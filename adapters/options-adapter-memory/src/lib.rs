//! In-process option store.
//!
//! Values and registrations live in two maps behind `parking_lot` locks.
//! Writes are last-write-wins per key; there is no cross-key transaction.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

use parking_lot::RwLock;
use std::collections::HashMap;

use dragdrop::option_store::{OptionStore, RegisteredOption, SettingValue};
use dragdrop::prelude::*;

#[derive(Debug, Default)]
pub struct MemoryOptionStore {
	values: RwLock<HashMap<String, SettingValue>>,
	registrations: RwLock<HashMap<String, RegisteredOption>>,
}

impl MemoryOptionStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Seed the store from a JSON object of `key -> value`.
	///
	/// Values that are not strings, integers or booleans are rejected.
	pub fn from_json(json: &serde_json::Value) -> ClResult<Self> {
		let serde_json::Value::Object(map) = json else {
			return Err(Error::ValidationError("option seed must be a JSON object".into()));
		};

		let mut values = HashMap::with_capacity(map.len());
		for (key, value) in map {
			let value: SettingValue = serde_json::from_value(value.clone()).map_err(|e| {
				Error::ValidationError(format!("invalid value for option '{}': {}", key, e))
			})?;
			values.insert(key.clone(), value);
		}

		Ok(Self { values: RwLock::new(values), registrations: RwLock::new(HashMap::new()) })
	}

	/// Copy of every stored value, as a JSON object
	pub fn snapshot(&self) -> serde_json::Value {
		let values = self.values.read();
		let map = values
			.iter()
			.map(|(k, v)| (k.clone(), serde_json::to_value(v).unwrap_or(serde_json::Value::Null)))
			.collect::<serde_json::Map<_, _>>();
		serde_json::Value::Object(map)
	}

	/// Number of registered keys
	pub fn registered_count(&self) -> usize {
		self.registrations.read().len()
	}
}

impl OptionStore for MemoryOptionStore {
	fn read(&self, key: &str) -> ClResult<Option<SettingValue>> {
		Ok(self.values.read().get(key).cloned())
	}

	fn write(&self, key: &str, value: SettingValue) -> ClResult<bool> {
		let mut values = self.values.write();
		if values.get(key) == Some(&value) {
			return Ok(false);
		}
		debug!("option '{}' written", key);
		values.insert(key.to_string(), value);
		Ok(true)
	}

	fn register(&self, key: &str, option: RegisteredOption) -> ClResult<bool> {
		let mut registrations = self.registrations.write();
		match registrations.get(key) {
			Some(existing) if *existing == option => Ok(false),
			Some(_) => {
				warn!("option '{}' re-registered with a different declaration", key);
				registrations.insert(key.to_string(), option);
				Ok(true)
			}
			None => {
				registrations.insert(key.to_string(), option);
				Ok(true)
			}
		}
	}

	fn registration(&self, key: &str) -> Option<RegisteredOption> {
		self.registrations.read().get(key).cloned()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use dragdrop::option_store::{SanitizerKind, ValueType};

	fn text_option() -> RegisteredOption {
		RegisteredOption {
			group: "group".into(),
			sanitizer: SanitizerKind::Text,
			value_type: ValueType::String,
			default: SettingValue::from(""),
		}
	}

	#[test]
	fn test_read_missing_key() {
		let store = MemoryOptionStore::new();
		assert!(matches!(store.read("nope"), Ok(None)));
	}

	#[test]
	fn test_write_reports_change() {
		let store = MemoryOptionStore::new();
		assert!(matches!(store.write("k", SettingValue::Int(1)), Ok(true)));
		assert!(matches!(store.write("k", SettingValue::Int(1)), Ok(false)));
		assert!(matches!(store.write("k", SettingValue::Int(2)), Ok(true)));
		assert!(matches!(store.read("k"), Ok(Some(SettingValue::Int(2)))));
	}

	#[test]
	fn test_register_is_idempotent() {
		let store = MemoryOptionStore::new();
		assert!(matches!(store.register("k", text_option()), Ok(true)));
		assert!(matches!(store.register("k", text_option()), Ok(false)));
		assert_eq!(store.registered_count(), 1);
		assert_eq!(store.registration("k"), Some(text_option()));
	}

	#[test]
	fn test_seed_from_json() {
		let store = MemoryOptionStore::from_json(&serde_json::json!({
			"easy_dragdrop_max_file_size": 10,
			"easy_dragdrop_file_types_allowed": "jpg,png",
		}));
		let Ok(store) = store else {
			unreachable!("seed must parse");
		};
		assert!(matches!(
			store.read("easy_dragdrop_max_file_size"),
			Ok(Some(SettingValue::Int(10)))
		));
		assert_eq!(store.snapshot()["easy_dragdrop_file_types_allowed"], "jpg,png");
	}

	#[test]
	fn test_seed_rejects_non_object() {
		assert!(MemoryOptionStore::from_json(&serde_json::json!([1, 2])).is_err());
	}
}

// vim: ts=4
