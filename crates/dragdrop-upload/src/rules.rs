//! Upload field business rules
//!
//! Pure functions: no store access, no logging side effects beyond debug output.
//! Callers read the persisted options and pass them in.

use itertools::Itertools;

use crate::controls::{
	CONTROL_ALLOW_MULTIPLE, CONTROL_FILE_TYPES, CONTROL_MAX_FILE_SIZE, CONTROL_MAX_FILES,
};
use crate::prelude::*;
use dragdrop_types::form::FieldInstance;

const MIB: u64 = 1024 * 1024;

/// Per-instance upload configuration, read from the host's field settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadFieldConfig {
	pub field_id: String,
	pub allow_multiple: bool,
	pub max_files: Option<i64>,
	pub max_file_size_mb: Option<i64>,
	/// Comma-separated extension list
	pub allowed_extensions: Option<String>,
	pub required: bool,
}

impl UploadFieldConfig {
	pub fn from_instance(item: &FieldInstance) -> Self {
		Self {
			field_id: item.custom_id.clone(),
			allow_multiple: item.setting_flag(CONTROL_ALLOW_MULTIPLE),
			max_files: item.setting_int(CONTROL_MAX_FILES).filter(|n| *n > 0),
			max_file_size_mb: item.setting_int(CONTROL_MAX_FILE_SIZE).filter(|n| *n > 0),
			allowed_extensions: item.setting_str(CONTROL_FILE_TYPES).map(str::to_string),
			required: item.required,
		}
	}
}

pub fn mime_type_for_extension(extension: &str) -> Option<&'static str> {
	Some(match extension {
		// Image
		"jpg" | "jpeg" | "jpe" => "image/jpeg",
		"png" => "image/png",
		"gif" => "image/gif",
		"webp" => "image/webp",
		"avif" => "image/avif",
		"bmp" => "image/bmp",
		"tif" | "tiff" => "image/tiff",
		"ico" => "image/x-icon",
		"heic" => "image/heic",
		"svg" => "image/svg+xml",
		// Video
		"mp4" | "m4v" => "video/mp4",
		"mov" | "qt" => "video/quicktime",
		"webm" => "video/webm",
		"mkv" => "video/x-matroska",
		"avi" => "video/avi",
		"mpeg" | "mpg" | "mpe" => "video/mpeg",
		"wmv" => "video/x-ms-wmv",
		"3gp" | "3gpp" => "video/3gpp",
		// Audio
		"mp3" | "m4a" | "m4b" => "audio/mpeg",
		"wav" => "audio/wav",
		"ogg" | "oga" => "audio/ogg",
		"flac" => "audio/flac",
		"aac" => "audio/aac",
		"mid" | "midi" => "audio/midi",
		// Text
		"txt" | "asc" | "c" | "cc" | "h" | "srt" => "text/plain",
		"csv" => "text/csv",
		"tsv" => "text/tab-separated-values",
		"ics" => "text/calendar",
		"rtx" => "text/richtext",
		"vtt" => "text/vtt",
		// Document
		"pdf" => "application/pdf",
		"rtf" => "application/rtf",
		"doc" => "application/msword",
		"docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
		"xls" | "xla" | "xlt" | "xlw" => "application/vnd.ms-excel",
		"xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
		"ppt" | "pps" | "pot" => "application/vnd.ms-powerpoint",
		"pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
		"odt" => "application/vnd.oasis.opendocument.text",
		"ods" => "application/vnd.oasis.opendocument.spreadsheet",
		"odp" => "application/vnd.oasis.opendocument.presentation",
		"key" => "application/vnd.apple.keynote",
		"numbers" => "application/vnd.apple.numbers",
		"pages" => "application/vnd.apple.pages",
		"psd" => "image/vnd.adobe.photoshop",
		// Archive
		"zip" => "application/zip",
		"gz" | "gzip" => "application/x-gzip",
		"tar" => "application/x-tar",
		"rar" => "application/rar",
		"7z" => "application/x-7z-compressed",
		_ => None?,
	})
}

/// Translate a comma-separated extension list to MIME types.
///
/// Order follows the first occurrence, duplicates (`jpg,jpeg`) collapse and
/// unknown extensions are dropped.
pub fn extensions_to_mime_types(extensions: &str) -> Vec<&'static str> {
	extensions
		.split(',')
		.map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
		.filter(|ext| !ext.is_empty())
		.filter_map(|ext| {
			let mime = mime_type_for_extension(&ext);
			if mime.is_none() {
				debug!("Dropping unknown file extension: {}", ext);
			}
			mime
		})
		.unique()
		.collect()
}

/// Platform upload ceiling in whole megabytes, never below 1
pub fn ceiling_mb(max_upload_bytes: u64) -> i64 {
	i64::try_from(max_upload_bytes / MIB).unwrap_or(i64::MAX).max(1)
}

/// Resolve the max file size (MB): instance value, then persisted option, then ceiling.
///
/// Non-positive values count as absent, so the result is always positive.
pub fn effective_max_file_size(instance: Option<i64>, option: Option<i64>, ceiling_mb: i64) -> i64 {
	instance
		.filter(|n| *n > 0)
		.or(option.filter(|n| *n > 0))
		.unwrap_or(ceiling_mb)
		.max(1)
}

/// Resolve the allowed extension list: instance value, then persisted option.
///
/// An empty result means uploads are unrestricted.
pub fn effective_allowed_types(instance: Option<&str>, option: Option<&str>) -> String {
	[instance, option]
		.into_iter()
		.flatten()
		.map(str::trim)
		.find(|types| !types.is_empty())
		.unwrap_or_default()
		.to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_extensions_to_mime_types() {
		assert_eq!(extensions_to_mime_types("jpg,png"), vec!["image/jpeg", "image/png"]);
		assert_eq!(extensions_to_mime_types("jpg,bogus"), vec!["image/jpeg"]);
		assert_eq!(extensions_to_mime_types(" .PDF , jpeg, jpg "), vec!["application/pdf", "image/jpeg"]);
		assert!(extensions_to_mime_types("").is_empty());
		assert!(extensions_to_mime_types(" , ,").is_empty());
	}

	#[test]
	fn test_ceiling_mb() {
		assert_eq!(ceiling_mb(100 * MIB), 100);
		assert_eq!(ceiling_mb(MIB + MIB / 2), 1);
		assert_eq!(ceiling_mb(1024), 1);
		assert_eq!(ceiling_mb(0), 1);
	}

	#[test]
	fn test_override_chain() {
		assert_eq!(effective_max_file_size(Some(25), Some(10), 64), 25);
		assert_eq!(effective_max_file_size(None, Some(10), 64), 10);
		assert_eq!(effective_max_file_size(None, None, 64), 64);
		assert_eq!(effective_max_file_size(Some(0), Some(-3), 64), 64);
		assert_eq!(effective_max_file_size(None, None, 0), 1);
	}

	#[test]
	fn test_allowed_types_chain() {
		assert_eq!(effective_allowed_types(Some("png"), Some("jpg")), "png");
		assert_eq!(effective_allowed_types(Some("  "), Some("jpg")), "jpg");
		assert_eq!(effective_allowed_types(None, None), "");
	}

	#[test]
	fn test_config_from_instance() {
		let item = FieldInstance::new("files", "easy-dragdrop-upload")
			.with_required(true)
			.with_setting(CONTROL_ALLOW_MULTIPLE, "yes")
			.with_setting(CONTROL_MAX_FILES, "3")
			.with_setting(CONTROL_MAX_FILE_SIZE, "25")
			.with_setting(CONTROL_FILE_TYPES, "");

		let config = UploadFieldConfig::from_instance(&item);
		assert!(config.allow_multiple);
		assert!(config.required);
		assert_eq!(config.max_files, Some(3));
		assert_eq!(config.max_file_size_mb, Some(25));
		assert_eq!(config.allowed_extensions, None);
	}

	#[test]
	fn test_config_switch_off() {
		let item = FieldInstance::new("files", "easy-dragdrop-upload")
			.with_setting(CONTROL_ALLOW_MULTIPLE, "");
		assert!(!UploadFieldConfig::from_instance(&item).allow_multiple);
	}
}

// vim: ts=4
