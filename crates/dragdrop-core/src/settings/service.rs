//! Settings service: reads with declared defaults, sanitized writes
//!
//! Values are never cached. Every read goes to the store so concurrent admin
//! edits are visible to the next render. Store failures never reach the
//! caller: reads fall back to the default, writes report `false`.

use std::sync::Arc;

use super::sanitize;
use super::types::SettingField;
use crate::prelude::*;
use dragdrop_types::option_store::{OptionStore, RegisteredOption, SettingValue};

pub struct SettingsService {
	store: Arc<dyn OptionStore>,
}

impl std::fmt::Debug for SettingsService {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingsService").finish_non_exhaustive()
	}
}

impl SettingsService {
	pub fn new(store: Arc<dyn OptionStore>) -> Self {
		Self { store }
	}

	/// Read a value, falling back to `default` when missing or unreadable
	pub fn get_or(&self, key: &str, default: SettingValue) -> SettingValue {
		match self.store.read(key) {
			Ok(Some(value)) => value,
			Ok(None) => default,
			Err(e) => {
				warn!("Option '{}' unavailable, using default: {}", key, e);
				default
			}
		}
	}

	/// Read a stored value without a default. Store failures read as `None`.
	pub fn get_opt(&self, key: &str) -> Option<SettingValue> {
		match self.store.read(key) {
			Ok(value) => value,
			Err(e) => {
				warn!("Option '{}' unavailable: {}", key, e);
				None
			}
		}
	}

	/// Integer read. Numeric strings are coerced; other shapes fall back to `default`.
	pub fn get_int_or(&self, key: &str, default: i64) -> i64 {
		match self.get_opt(key) {
			Some(value) => value.as_int().unwrap_or_else(|| {
				warn!("Option '{}' is not an integer ({:?}), using default", key, value);
				default
			}),
			None => default,
		}
	}

	pub fn get_string_or(&self, key: &str, default: &str) -> String {
		match self.get_opt(key) {
			Some(value) => value.as_string().unwrap_or_else(|| default.to_string()),
			None => default.to_string(),
		}
	}

	/// Register the option behind a settings field.
	///
	/// Returns `true` only for a new registration; store failures are logged.
	pub fn register(&self, group: &str, field: &SettingField) -> bool {
		let option = RegisteredOption {
			group: group.to_string(),
			sanitizer: field.sanitize,
			value_type: field.sanitize.value_type(),
			default: field.default.clone(),
		};

		match self.store.register(&field.id, option) {
			Ok(true) => {
				debug!("Registered option '{}' in group '{}'", field.id, group);
				true
			}
			Ok(false) => false,
			Err(e) => {
				warn!("Failed to register option '{}': {}", field.id, e);
				false
			}
		}
	}

	/// Sanitize and persist a raw submitted value with the key's registered sanitizer.
	///
	/// Returns `false` when the key is not registered, the value is rejected,
	/// or the store fails.
	pub fn set(&self, key: &str, raw: &str) -> bool {
		let Some(registration) = self.store.registration(key) else {
			warn!("Refusing to save unregistered option '{}'", key);
			return false;
		};

		let value = match sanitize::sanitize(registration.sanitizer, raw) {
			Ok(Some(value)) => value,
			Ok(None) => {
				info!("Rejected value for option '{}'", key);
				return false;
			}
			Err(e) => {
				error!("Sanitizer failed for option '{}': {}", key, e);
				return false;
			}
		};

		match self.store.write(key, value) {
			Ok(changed) => {
				if changed {
					info!("Option '{}' updated", key);
				}
				true
			}
			Err(e) => {
				warn!("Failed to save option '{}': {}", key, e);
				false
			}
		}
	}
}


// vim: ts=4
