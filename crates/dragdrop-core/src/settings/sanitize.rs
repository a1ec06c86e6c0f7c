//! Storage sanitizers
//!
//! Every value that reaches the option store passes through one of these,
//! chosen by the `SanitizerKind` the option was registered with. Length caps
//! are enforced here, not only by the input's `maxlength`.

use regex::Regex;

use crate::prelude::*;
use dragdrop_types::option_store::{SanitizerKind, SettingValue};

fn regex(pattern: &str) -> ClResult<Regex> {
	Regex::new(pattern).map_err(|e| Error::Internal(format!("regex error: {}", e)))
}

/// Remove markup. Script and style elements are removed with their content.
///
/// Only `<` followed by a letter, `/`, `!` or `?` opens a tag; any other `<`
/// is text and is kept.
pub fn strip_tags(input: &str) -> ClResult<String> {
	let with_content = regex(r"(?is)<(script|style)[^>]*?>.*?</(script|style)\s*>")?;
	let tags = regex(r"(?s)<[a-zA-Z/!?][^>]*>?")?;

	let result = with_content.replace_all(input, "");
	Ok(tags.replace_all(&result, "").into_owned())
}

/// Single-line text: tags stripped, whitespace runs (line breaks included) collapsed, trimmed
pub fn sanitize_text_field(input: &str) -> ClResult<String> {
	let stripped = strip_tags(input)?;
	let whitespace = regex(r"[\r\n\t ]+")?;
	Ok(whitespace.replace_all(&stripped, " ").trim().to_string())
}

/// Multi-line text: tags stripped, line breaks kept, trimmed, capped at `max_chars`
pub fn sanitize_textarea_field(input: &str, max_chars: Option<usize>) -> ClResult<String> {
	let stripped = strip_tags(&input.replace("\r\n", "\n"))?;
	let blanks = regex(r"[\t ]+")?;
	let cleaned = blanks.replace_all(&stripped, " ");
	let cleaned = cleaned.trim();

	Ok(match max_chars {
		Some(max) if cleaned.chars().count() > max => {
			cleaned.chars().take(max).collect::<String>().trim_end().to_string()
		}
		_ => cleaned.to_string(),
	})
}

/// Whole number clamped to `min`. Non-numeric input is rejected.
pub fn sanitize_integer(input: &str, min: i64) -> Option<i64> {
	input.trim().parse::<i64>().ok().map(|n| n.max(min))
}

/// Apply a sanitizer to a raw submitted value.
///
/// `Ok(None)` means the value was rejected and must not be stored.
pub fn sanitize(kind: SanitizerKind, raw: &str) -> ClResult<Option<SettingValue>> {
	Ok(match kind {
		SanitizerKind::Text => Some(SettingValue::String(sanitize_text_field(raw)?)),
		SanitizerKind::Textarea { max_chars } => {
			Some(SettingValue::String(sanitize_textarea_field(raw, max_chars)?))
		}
		SanitizerKind::Integer { min } => sanitize_integer(raw, min).map(SettingValue::Int),
	})
}


// vim: ts=4
