//! Per-field controls contributed to the host's form editor

use crate::prelude::*;
use dragdrop_types::form::{ControlDefinition, ControlHost, ControlKind};

pub const CONTROL_MAX_FILE_SIZE: &str = "easy_dragdrop_max_file_size";
pub const CONTROL_FILE_TYPES: &str = "easy_dragdrop_file_types";
pub const CONTROL_ALLOW_MULTIPLE: &str = "easy_dragdrop_allow_multiple_upload";
pub const CONTROL_MAX_FILES: &str = "easy_dragdrop_max_files";

const TAB: &str = "content";
const INNER_TAB: &str = "form_fields_content_tab";
const TABS_WRAPPER: &str = "form_fields_tabs";

/// Defaults shown for a freshly added upload field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlDefaults {
	pub max_file_size_mb: i64,
	pub file_types: String,
}

/// Upper bound on the entries of the max size select
pub const MAX_FILE_SIZE_OPTIONS: i64 = 2048;

/// Select options for the max size control: `1..=ceiling` in whole MB, at most
/// `MAX_FILE_SIZE_OPTIONS` entries
pub fn file_size_options(ceiling_mb: i64) -> Vec<(String, String)> {
	(1..=ceiling_mb.clamp(1, MAX_FILE_SIZE_OPTIONS))
		.map(|size| (size.to_string(), format!("{}MB", size)))
		.collect()
}

/// The four upload controls, each visible only for `field_type`
pub fn upload_controls(
	field_type: &str,
	ceiling_mb: i64,
	defaults: ControlDefaults,
) -> Vec<ControlDefinition> {
	vec![
		ControlDefinition::new(CONTROL_MAX_FILE_SIZE, "Max. File Size", ControlKind::Select)
			.condition("field_type", field_type)
			.default_value(defaults.max_file_size_mb.to_string())
			.options(file_size_options(ceiling_mb))
			.description("If you need to increase max upload size please contact your hosting.")
			.placement(TAB, INNER_TAB, TABS_WRAPPER),
		ControlDefinition::new(CONTROL_FILE_TYPES, "Allowed File Types", ControlKind::Text)
			.label_block(true)
			.default_value(defaults.file_types)
			.condition("field_type", field_type)
			.description(
				"Enter the allowed file types, separated by a comma (jpg, gif, pdf, etc).",
			)
			.placement(TAB, INNER_TAB, TABS_WRAPPER),
		ControlDefinition::new(CONTROL_ALLOW_MULTIPLE, "Multiple Files", ControlKind::Switcher)
			.condition("field_type", field_type)
			.placement(TAB, INNER_TAB, TABS_WRAPPER),
		ControlDefinition::new(CONTROL_MAX_FILES, "Max. Files", ControlKind::Number)
			.condition("field_type", field_type)
			.condition(CONTROL_ALLOW_MULTIPLE, "yes")
			.placement(TAB, INNER_TAB, TABS_WRAPPER),
	]
}

/// Insert `controls` into the host's stack right after `anchor`.
///
/// When the host cannot provide its stack, nothing is injected and `false` is
/// returned. A missing anchor appends the controls at the end.
pub fn inject_controls(
	host: &mut dyn ControlHost,
	anchor: &str,
	controls: Vec<ControlDefinition>,
) -> bool {
	let mut stack = match host.form_fields() {
		Ok(stack) => stack,
		Err(e) => {
			warn!("Skipping upload control injection: {}", e);
			return false;
		}
	};

	if !stack.insert_after(anchor, controls) {
		warn!("Control '{}' not found, upload controls appended", anchor);
	}
	host.update_form_fields(stack);
	true
}


// vim: ts=4
