//! Global uploader options: keys, settings schema and typed readers

use dragdrop_core::settings::{
	FieldRenderer, SchemaRegistry, SettingField, SettingSection, SettingsService,
};

use crate::prelude::*;
use dragdrop_types::option_store::{SanitizerKind, SettingValue};

pub const OPTION_MAX_FILE_SIZE: &str = "easy_dragdrop_max_file_size";
pub const OPTION_BUTTON_LABEL: &str = "easy_dragdrop_button_label";
pub const OPTION_FILE_TYPES_ALLOWED: &str = "easy_dragdrop_file_types_allowed";
pub const OPTION_FILE_TYPE_ERROR: &str = "easy_dragdrop_file_type_error";
pub const OPTION_FILE_SIZE_ERROR: &str = "easy_dragdrop_file_size_error";

pub const GENERAL_SECTION: &str = "easy_dragdrop_general_section";

/// Storage cap of the error message options, in characters
pub const ERROR_MESSAGE_MAX_CHARS: usize = 120;

fn error_message_field(id: &str, title: &str, help: &str) -> ClResult<SettingField> {
	SettingField::builder(id)
		.title(title)
		.section(GENERAL_SECTION)
		.render(FieldRenderer::Textarea { rows: 3, cols: 50, max_length: 120 })
		.sanitize(SanitizerKind::Textarea { max_chars: Some(ERROR_MESSAGE_MAX_CHARS) })
		.help(help)
		.build()
}

/// Declare the general section and its five options
pub fn register_settings(registry: &mut SchemaRegistry, ceiling_mb: i64) -> ClResult<()> {
	registry.register_section(SettingSection::new(
		GENERAL_SECTION,
		"General Settings",
		"Configure the DragDrop uploader settings.",
	))?;

	registry.register_field(
		SettingField::builder(OPTION_MAX_FILE_SIZE)
			.title("Max. File Size")
			.section(GENERAL_SECTION)
			.render(FieldRenderer::Number { min: 1, step: 1 })
			.sanitize(SanitizerKind::Integer { min: 1 })
			.default(SettingValue::Int(ceiling_mb.max(1)))
			.help("Default max. file size in MB. Can be overridden in the field settings.")
			.build()?,
	)?;
	registry.register_field(
		SettingField::builder(OPTION_BUTTON_LABEL)
			.title("Default Button Label")
			.section(GENERAL_SECTION)
			.build()?,
	)?;
	registry.register_field(
		SettingField::builder(OPTION_FILE_TYPES_ALLOWED)
			.title("Default File Types Allowed")
			.section(GENERAL_SECTION)
			.help(
				"Default allowed file types, separated by a comma (jpg, gif, pdf, etc). \
				 Can be overridden in the field settings.",
			)
			.build()?,
	)?;
	registry.register_field(error_message_field(
		OPTION_FILE_TYPE_ERROR,
		"File Type Error Message",
		"Enter an error message to show when an uploaded file type is invalid. \
		 Leave blank to use the DragDrop uploader default message.",
	)?)?;
	registry.register_field(error_message_field(
		OPTION_FILE_SIZE_ERROR,
		"File Size Error Message",
		"Enter an error message to show when an uploaded file exceeds the file size limit.",
	)?)?;

	Ok(())
}

/// Persisted global max file size, if set to a positive value
pub fn persisted_max_file_size(settings: &SettingsService) -> Option<i64> {
	settings.get_opt(OPTION_MAX_FILE_SIZE)?.as_int().filter(|n| *n > 0)
}

/// Persisted global allowed extension list, if non-empty
pub fn persisted_file_types(settings: &SettingsService) -> Option<String> {
	settings
		.get_opt(OPTION_FILE_TYPES_ALLOWED)?
		.as_string()
		.map(|types| types.trim().to_string())
		.filter(|types| !types.is_empty())
}


// vim: ts=4
