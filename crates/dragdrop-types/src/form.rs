//! Host form boundary: field instances, per-field control schema, submission records.
//!
//! These types describe what the host form builder hands to a field kind.
//! None of them are persisted by this workspace.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::prelude::*;

// Field instances //
//*****************//

/// One configured field of a form, as supplied by the host at render time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldInstance {
	pub custom_id: String,
	pub field_type: String,
	#[serde(default)]
	pub field_label: Option<String>,
	#[serde(default)]
	pub required: bool,
	/// Every other per-instance setting, keyed by control name
	#[serde(flatten)]
	pub settings: serde_json::Map<String, serde_json::Value>,
}

impl FieldInstance {
	pub fn new(custom_id: impl Into<String>, field_type: impl Into<String>) -> Self {
		Self {
			custom_id: custom_id.into(),
			field_type: field_type.into(),
			..Default::default()
		}
	}

	/// Set a per-instance setting
	pub fn with_setting(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
		self.settings.insert(key.to_string(), value.into());
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.field_label = Some(label.into());
		self
	}

	pub fn with_required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	/// Non-empty string setting
	pub fn setting_str(&self, key: &str) -> Option<&str> {
		match self.settings.get(key)? {
			serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.as_str()),
			_ => None,
		}
	}

	/// Integer setting. Select controls deliver numbers as strings, so those are parsed too.
	pub fn setting_int(&self, key: &str) -> Option<i64> {
		match self.settings.get(key)? {
			serde_json::Value::Number(n) => n.as_i64(),
			serde_json::Value::String(s) => s.trim().parse().ok(),
			_ => None,
		}
	}

	/// Switch setting. Switchers store `"yes"` when on and `""` when off.
	pub fn setting_flag(&self, key: &str) -> bool {
		match self.settings.get(key) {
			Some(serde_json::Value::Bool(b)) => *b,
			Some(serde_json::Value::String(s)) => !s.is_empty() && s != "0",
			Some(serde_json::Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
			_ => false,
		}
	}

	/// Raw string value used when evaluating control conditions
	fn condition_value(&self, key: &str) -> String {
		if key == "field_type" {
			return self.field_type.clone();
		}
		match self.settings.get(key) {
			Some(serde_json::Value::String(s)) => s.clone(),
			Some(serde_json::Value::Bool(true)) => "yes".into(),
			Some(serde_json::Value::Number(n)) => n.to_string(),
			_ => String::new(),
		}
	}
}

// Control schema //
//****************//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
	Select,
	Text,
	Switcher,
	Number,
}

/// One control of the host's per-field configuration UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlDefinition {
	pub name: String,
	pub label: String,
	#[serde(rename = "type")]
	pub kind: ControlKind,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub default: Option<serde_json::Value>,
	/// Ordered (value, label) pairs for select controls
	#[serde(skip_serializing_if = "Vec::is_empty", default)]
	pub options: Vec<(String, String)>,
	/// Every (control, expected value) pair must match for the control to show
	#[serde(skip_serializing_if = "Vec::is_empty", default)]
	pub condition: Vec<(String, String)>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default)]
	pub label_block: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tab: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub inner_tab: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tabs_wrapper: Option<String>,
}

impl ControlDefinition {
	pub fn new(name: impl Into<String>, label: impl Into<String>, kind: ControlKind) -> Self {
		Self {
			name: name.into(),
			label: label.into(),
			kind,
			default: None,
			options: Vec::new(),
			condition: Vec::new(),
			description: None,
			label_block: false,
			tab: None,
			inner_tab: None,
			tabs_wrapper: None,
		}
	}

	pub fn default_value(mut self, value: impl Into<serde_json::Value>) -> Self {
		self.default = Some(value.into());
		self
	}

	pub fn options(mut self, options: Vec<(String, String)>) -> Self {
		self.options = options;
		self
	}

	pub fn condition(mut self, control: impl Into<String>, expected: impl Into<String>) -> Self {
		self.condition.push((control.into(), expected.into()));
		self
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn label_block(mut self, label_block: bool) -> Self {
		self.label_block = label_block;
		self
	}

	/// Place the control in a tab of the repeater item
	pub fn placement(
		mut self,
		tab: impl Into<String>,
		inner_tab: impl Into<String>,
		tabs_wrapper: impl Into<String>,
	) -> Self {
		self.tab = Some(tab.into());
		self.inner_tab = Some(inner_tab.into());
		self.tabs_wrapper = Some(tabs_wrapper.into());
		self
	}

	/// Evaluate the visibility condition against a field instance
	pub fn is_visible_for(&self, instance: &FieldInstance) -> bool {
		self.condition
			.iter()
			.all(|(control, expected)| instance.condition_value(control) == *expected)
	}
}

/// Ordered per-field control list of a form widget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlStack {
	controls: Vec<ControlDefinition>,
}

impl ControlStack {
	pub fn new(controls: Vec<ControlDefinition>) -> Self {
		Self { controls }
	}

	pub fn get(&self, name: &str) -> Option<&ControlDefinition> {
		self.controls.iter().find(|c| c.name == name)
	}

	pub fn position(&self, name: &str) -> Option<usize> {
		self.controls.iter().position(|c| c.name == name)
	}

	pub fn names(&self) -> Vec<&str> {
		self.controls.iter().map(|c| c.name.as_str()).collect()
	}

	pub fn len(&self) -> usize {
		self.controls.len()
	}

	pub fn is_empty(&self) -> bool {
		self.controls.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &ControlDefinition> {
		self.controls.iter()
	}

	/// Insert controls right after `anchor`, replacing earlier copies of the same names.
	///
	/// Returns `false` (and appends at the end) when the anchor is not in the stack.
	pub fn insert_after(&mut self, anchor: &str, controls: Vec<ControlDefinition>) -> bool {
		self.controls.retain(|c| !controls.iter().any(|new| new.name == c.name));

		match self.position(anchor) {
			Some(pos) => {
				let tail = self.controls.split_off(pos + 1);
				self.controls.extend(controls);
				self.controls.extend(tail);
				true
			}
			None => {
				self.controls.extend(controls);
				false
			}
		}
	}
}

/// Host access to the per-field control stack of the form widget
pub trait ControlHost {
	/// Current control stack. Fails when the host cannot locate the form fields control.
	fn form_fields(&self) -> ClResult<ControlStack>;

	/// Replace the control stack
	fn update_form_fields(&mut self, stack: ControlStack);
}

// Submissions //
//*************//

/// Submitted value of a field: one string or an ordered list (multi-file uploads)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
	Scalar(String),
	List(Vec<String>),
}

impl Default for FieldValue {
	fn default() -> Self {
		FieldValue::Scalar(String::new())
	}
}

impl FieldValue {
	/// No non-blank element. A multi-file input posted without a selection
	/// arrives as `[""]`.
	pub fn is_empty(&self) -> bool {
		match self {
			FieldValue::Scalar(s) => s.trim().is_empty(),
			FieldValue::List(list) => list.iter().all(|s| s.trim().is_empty()),
		}
	}

	/// Normalize to an ordered list, wrapping a scalar into a single element
	pub fn to_list(&self) -> Vec<String> {
		match self {
			FieldValue::Scalar(s) => vec![s.clone()],
			FieldValue::List(list) => list.clone(),
		}
	}
}

impl From<&str> for FieldValue {
	fn from(s: &str) -> Self {
		FieldValue::Scalar(s.to_string())
	}
}

impl From<Vec<String>> for FieldValue {
	fn from(list: Vec<String>) -> Self {
		FieldValue::List(list)
	}
}

/// Field data handed to validation and post-processing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmittedField {
	pub id: String,
	pub field_type: String,
	#[serde(default)]
	pub required: bool,
	#[serde(default)]
	pub value: FieldValue,
	#[serde(default)]
	pub raw_value: FieldValue,
}

/// Which slot of a record field to update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKey {
	/// Display value shown in submissions and emails
	Value,
	/// Underlying stored value
	RawValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordField {
	pub id: String,
	pub field_type: String,
	pub value: String,
	pub raw_value: String,
}

/// Submission record of one form post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormRecord {
	fields: Vec<RecordField>,
}

impl FormRecord {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, field: RecordField) {
		match self.fields.iter_mut().find(|f| f.id == field.id) {
			Some(existing) => *existing = field,
			None => self.fields.push(field),
		}
	}

	pub fn field(&self, id: &str) -> Option<&RecordField> {
		self.fields.iter().find(|f| f.id == id)
	}

	pub fn fields(&self) -> &[RecordField] {
		&self.fields
	}

	/// Update one slot of a field. Returns `false` if the record has no such field.
	pub fn update_field(&mut self, id: &str, key: RecordKey, value: impl Into<String>) -> bool {
		let Some(field) = self.fields.iter_mut().find(|f| f.id == id) else {
			return false;
		};
		match key {
			RecordKey::Value => field.value = value.into(),
			RecordKey::RawValue => field.raw_value = value.into(),
		}
		true
	}

	pub fn into_shared(self) -> SharedRecord {
		Arc::new(RwLock::new(self))
	}
}

/// Record handle passed through events; subscribers may update it
pub type SharedRecord = Arc<RwLock<FormRecord>>;

/// Collects field-level validation errors for the host's response
pub trait ErrorSink {
	fn add_error(&mut self, field_id: &str, message: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
	errors: Vec<(String, String)>,
}

impl ValidationErrors {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.errors.is_empty()
	}

	pub fn len(&self) -> usize {
		self.errors.len()
	}

	pub fn get(&self, field_id: &str) -> Option<&str> {
		self.errors.iter().find(|(id, _)| id == field_id).map(|(_, msg)| msg.as_str())
	}
}

impl ErrorSink for ValidationErrors {
	fn add_error(&mut self, field_id: &str, message: &str) {
		debug!("Validation error on field '{}': {}", field_id, message);
		self.errors.push((field_id.to_string(), message.to_string()));
	}
}


// vim: ts=4
