//! Option store adapter. Key/value persistence for plugin-wide settings.
//!
//! The store is owned by the host. This crate only describes the contract:
//! read, write and register a key with its sanitizer. Atomicity is the
//! store's business (last write wins per key, no cross-key transactions).

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Persisted option value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
	Bool(bool), // Must be before Int to avoid bool -> int coercion
	Int(i64),
	String(String),
}

impl SettingValue {
	/// Integer view of the value. Numeric strings are coerced.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			SettingValue::Int(i) => Some(*i),
			SettingValue::String(s) => s.trim().parse().ok(),
			SettingValue::Bool(_) => None,
		}
	}

	/// String view of the value. Integers are formatted.
	pub fn as_string(&self) -> Option<String> {
		match self {
			SettingValue::String(s) => Some(s.clone()),
			SettingValue::Int(i) => Some(i.to_string()),
			SettingValue::Bool(_) => None,
		}
	}

	pub fn value_type(&self) -> ValueType {
		match self {
			SettingValue::Bool(_) => ValueType::Boolean,
			SettingValue::Int(_) => ValueType::Integer,
			SettingValue::String(_) => ValueType::String,
		}
	}
}

impl From<&str> for SettingValue {
	fn from(s: &str) -> Self {
		SettingValue::String(s.to_string())
	}
}

impl From<String> for SettingValue {
	fn from(s: String) -> Self {
		SettingValue::String(s)
	}
}

impl From<i64> for SettingValue {
	fn from(i: i64) -> Self {
		SettingValue::Int(i)
	}
}

/// Declared storage type of an option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	String,
	Integer,
	Boolean,
}

/// How an incoming value is cleaned before it reaches the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SanitizerKind {
	/// Single line: tags stripped, whitespace collapsed
	Text,
	/// Multi line: tags stripped, line breaks kept, optional character cap
	Textarea { max_chars: Option<usize> },
	/// Whole number, clamped to `min`
	Integer { min: i64 },
}

impl SanitizerKind {
	pub fn value_type(&self) -> ValueType {
		match self {
			SanitizerKind::Text | SanitizerKind::Textarea { .. } => ValueType::String,
			SanitizerKind::Integer { .. } => ValueType::Integer,
		}
	}
}

/// Registration record for one option key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredOption {
	pub group: String,
	pub sanitizer: SanitizerKind,
	pub value_type: ValueType,
	pub default: SettingValue,
}

/// Host-provided option persistence
pub trait OptionStore: Send + Sync {
	/// Read the stored value. `Ok(None)` means the key was never written.
	fn read(&self, key: &str) -> ClResult<Option<SettingValue>>;

	/// Write a value. Returns `true` if the stored value changed.
	fn write(&self, key: &str, value: SettingValue) -> ClResult<bool>;

	/// Register a key with its sanitizer.
	///
	/// Returns `false` if an identical registration already exists.
	fn register(&self, key: &str, option: RegisteredOption) -> ClResult<bool>;

	/// Registration record for a key, if any
	fn registration(&self, key: &str) -> Option<RegisteredOption>;
}


// vim: ts=4
