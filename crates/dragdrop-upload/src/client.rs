//! Configuration handed to the front-end uploader script

use serde::Serialize;

use dragdrop_core::settings::SettingsService;

use crate::prelude::*;
use crate::rules;
use crate::settings::{
	OPTION_BUTTON_LABEL, OPTION_FILE_SIZE_ERROR, OPTION_FILE_TYPE_ERROR, persisted_max_file_size,
};

/// Front-end uploader options. Empty strings mean the uploader's built-in text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploaderClientConfig {
	pub button_label: String,
	pub file_type_error: String,
	pub file_size_error: String,
	/// Global max file size in MB
	pub max_file_size: i64,
}

impl UploaderClientConfig {
	/// Read the current options. Called per page view; nothing is cached.
	pub fn load(settings: &SettingsService, ceiling_mb: i64) -> Self {
		Self {
			button_label: settings.get_string_or(OPTION_BUTTON_LABEL, ""),
			file_type_error: settings.get_string_or(OPTION_FILE_TYPE_ERROR, ""),
			file_size_error: settings.get_string_or(OPTION_FILE_SIZE_ERROR, ""),
			max_file_size: rules::effective_max_file_size(
				None,
				persisted_max_file_size(settings),
				ceiling_mb,
			),
		}
	}

	pub fn to_json(&self) -> ClResult<String> {
		Ok(serde_json::to_string(self)?)
	}
}


// vim: ts=4
