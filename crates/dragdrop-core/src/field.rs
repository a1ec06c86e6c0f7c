//! Field kind capability contract of the host form builder
//!
//! A field kind plugs into a fixed lifecycle: type, name, control schema,
//! render, validate, post-process. The host's shared base behaviour is
//! available as plain helper functions in [`base`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::prelude::*;
use crate::render::RenderAttributes;
use dragdrop_types::form::{ControlHost, ErrorSink, FieldInstance, SharedRecord, SubmittedField};

/// Host render context for one form
#[derive(Debug, Clone, Default)]
pub struct FormContext {
	pub form_id: String,
	pub form_name: String,
}

impl FormContext {
	pub fn new(form_id: impl Into<String>) -> Self {
		Self { form_id: form_id.into(), form_name: String::new() }
	}
}

pub trait FieldKind: Send + Sync {
	/// Constant identifier of the kind in the host's field registry
	fn field_type(&self) -> &'static str;

	/// Human readable name shown in the field type picker
	fn display_name(&self) -> String;

	/// Contribute controls to the per-field configuration UI
	fn update_controls(&self, host: &mut dyn ControlHost);

	/// Render the input markup of one field instance
	fn render(&self, item: &FieldInstance, item_index: usize, form: &FormContext) -> ClResult<String>;

	/// Validate a submitted value. Errors are also reported to `errors`.
	fn validation(
		&self,
		field: &SubmittedField,
		record: &SharedRecord,
		errors: &mut dyn ErrorSink,
	) -> ClResult<()>;

	/// Post-process a validated submission
	fn process_field(
		&self,
		field: &SubmittedField,
		record: &SharedRecord,
		errors: &mut dyn ErrorSink,
	) -> ClResult<()>;
}

/// Default behaviour of the host's base field kind
pub mod base {
	use super::*;

	/// Submission name of a field: `form_fields[<id>]`
	pub fn attribute_name(item: &FieldInstance) -> String {
		format!("form_fields[{}]", item.custom_id)
	}

	/// DOM id of a field input
	pub fn attribute_id(item: &FieldInstance) -> String {
		format!("form-field-{}", item.custom_id)
	}

	/// Attributes every input starts with before a kind adds its own
	pub fn base_input_attributes(item: &FieldInstance) -> RenderAttributes {
		let mut attrs = RenderAttributes::new();
		attrs
			.set("type", "text")
			.set("name", attribute_name(item))
			.set("id", attribute_id(item))
			.add("class", "elementor-field")
			.add("class", "elementor-size-sm");
		if item.required {
			attrs.set("required", "required").set("aria-required", "true");
		}
		attrs
	}
}

/// Field kinds known to the host, keyed by type identifier
#[derive(Default)]
pub struct FieldRegistry {
	kinds: HashMap<&'static str, Arc<dyn FieldKind>>,
}

impl std::fmt::Debug for FieldRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FieldRegistry").field("kinds", &self.types()).finish()
	}
}

impl FieldRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, kind: Arc<dyn FieldKind>) -> ClResult<()> {
		let field_type = kind.field_type();
		if self.kinds.contains_key(field_type) {
			return Err(Error::ConfigError(format!(
				"Field kind '{}' is already registered",
				field_type
			)));
		}
		info!("Registering field kind: {}", field_type);
		self.kinds.insert(field_type, kind);
		Ok(())
	}

	pub fn get(&self, field_type: &str) -> Option<&Arc<dyn FieldKind>> {
		self.kinds.get(field_type)
	}

	pub fn types(&self) -> Vec<&'static str> {
		let mut types: Vec<_> = self.kinds.keys().copied().collect();
		types.sort_unstable();
		types
	}
}


// vim: ts=4
