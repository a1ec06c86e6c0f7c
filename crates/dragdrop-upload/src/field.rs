//! Drag and drop upload field kind
//!
//! Plugs into the host form builder's field lifecycle. Type and size
//! enforcement happens in the uploader script and the upload transport; this
//! kind only guards required fields and hands submitted files over to
//! persistence consumers through events.

use std::sync::Arc;

use dragdrop_core::field::{FieldKind, FormContext, base};
use dragdrop_core::hooks::Hooks;
use dragdrop_core::render::RenderAttributes;
use dragdrop_core::settings::SettingsService;

use crate::controls::{self, ControlDefaults};
use crate::events::{BeforeRenderInput, ProcessField, ProcessedFiles};
use crate::kses;
use crate::prelude::*;
use crate::rules::{self, UploadFieldConfig};
use crate::settings::{persisted_file_types, persisted_max_file_size};
use dragdrop_types::form::{
	ControlHost, ErrorSink, FieldInstance, RecordKey, SharedRecord, SubmittedField,
};

pub const FIELD_TYPE: &str = "easy-dragdrop-upload";
pub const VALIDATION_MESSAGE: &str = "Upload a valid file";

pub struct DragDropUpload {
	settings: Arc<SettingsService>,
	hooks: Arc<Hooks>,
	ceiling_mb: i64,
	control_anchor: String,
}

impl std::fmt::Debug for DragDropUpload {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DragDropUpload")
			.field("ceiling_mb", &self.ceiling_mb)
			.field("control_anchor", &self.control_anchor)
			.finish_non_exhaustive()
	}
}

impl DragDropUpload {
	pub fn new(
		settings: Arc<SettingsService>,
		hooks: Arc<Hooks>,
		ceiling_mb: i64,
		control_anchor: impl Into<String>,
	) -> Self {
		Self { settings, hooks, ceiling_mb: ceiling_mb.max(1), control_anchor: control_anchor.into() }
	}

	/// Subscribe the record writer to `ProcessedFiles`
	pub fn install(&self) {
		self.hooks.on::<ProcessedFiles>(Self::on_files_processed);
	}

	pub fn ceiling_mb(&self) -> i64 {
		self.ceiling_mb
	}

	/// Write processed file results into the submission record.
	///
	/// URLs become the display value and stored paths the raw value, each
	/// joined with `", "` in upload order.
	pub fn on_files_processed(event: &ProcessedFiles) {
		let mut record = event.record.write();
		let shown =
			record.update_field(&event.field_id, RecordKey::Value, event.public_urls.join(", "));
		let stored = record.update_field(
			&event.field_id,
			RecordKey::RawValue,
			event.stored_paths.join(", "),
		);

		if shown && stored {
			debug!("Record updated with {} file(s) for field '{}'", event.stored_paths.len(), event.field_id);
		} else {
			warn!("Processed files for field '{}' not in the record", event.field_id);
		}
	}

	/// Attributes of the upload input, before the allow-list
	pub fn input_attributes(&self, item: &FieldInstance) -> RenderAttributes {
		let config = UploadFieldConfig::from_instance(item);
		let mut attrs = base::base_input_attributes(item);
		attrs.add("class", "easy-dragdrop-upload").set("type", "file");

		if config.allow_multiple {
			attrs
				.set("multiple", "multiple")
				.set("name", format!("{}[]", base::attribute_name(item)));
		}

		let max_file_size = rules::effective_max_file_size(
			config.max_file_size_mb,
			persisted_max_file_size(&self.settings),
			self.ceiling_mb,
		);
		let global_types = persisted_file_types(&self.settings);
		let file_types = rules::effective_allowed_types(
			config.allowed_extensions.as_deref(),
			global_types.as_deref(),
		);

		attrs
			.set("data-filesize", max_file_size.to_string())
			.set("data-filetypes", rules::extensions_to_mime_types(&file_types).join(","))
			.set("data-label", item.field_label.clone().unwrap_or_default())
			.set("data-maxfiles", config.max_files.map(|n| n.to_string()).unwrap_or_default());
		attrs
	}
}

impl FieldKind for DragDropUpload {
	fn field_type(&self) -> &'static str {
		FIELD_TYPE
	}

	fn display_name(&self) -> String {
		"DragDrop Upload".into()
	}

	fn update_controls(&self, host: &mut dyn ControlHost) {
		let defaults = ControlDefaults {
			max_file_size_mb: persisted_max_file_size(&self.settings).unwrap_or(self.ceiling_mb),
			file_types: persisted_file_types(&self.settings).unwrap_or_default(),
		};
		let controls = controls::upload_controls(FIELD_TYPE, self.ceiling_mb, defaults);
		if controls::inject_controls(host, &self.control_anchor, controls) {
			debug!("Upload controls injected after '{}'", self.control_anchor);
		}
	}

	fn render(&self, item: &FieldInstance, _item_index: usize, _form: &FormContext) -> ClResult<String> {
		let attributes = self.input_attributes(item).render();

		self.hooks.emit(&BeforeRenderInput {
			field_id: item.custom_id.clone(),
			attributes: attributes.clone(),
		});

		kses::filter_input_markup(&format!("<input {}>", attributes))
	}

	fn validation(
		&self,
		field: &SubmittedField,
		_record: &SharedRecord,
		errors: &mut dyn ErrorSink,
	) -> ClResult<()> {
		if field.required && field.value.is_empty() {
			errors.add_error(&field.id, VALIDATION_MESSAGE);
			return Err(Error::RequiredFieldMissing(field.id.as_str().into()));
		}
		Ok(())
	}

	fn process_field(
		&self,
		field: &SubmittedField,
		record: &SharedRecord,
		_errors: &mut dyn ErrorSink,
	) -> ClResult<()> {
		if field.raw_value.is_empty() {
			debug!("No files submitted for field '{}'", field.id);
			return Ok(());
		}
		let raw_values: Vec<String> =
			field.raw_value.to_list().into_iter().filter(|v| !v.trim().is_empty()).collect();

		let notified = self.hooks.emit(&ProcessField {
			field_id: field.id.clone(),
			raw_values,
			record: record.clone(),
		});
		if notified == 0 {
			warn!("No consumer for uploaded files of field '{}'", field.id);
		}
		Ok(())
	}
}


// vim: ts=4
