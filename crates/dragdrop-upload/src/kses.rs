//! Markup allow-list applied to the rendered upload input
//!
//! Only `<input>` survives, with a fixed set of attributes. Every other tag is
//! removed (its text content is kept) and every other attribute is dropped.

use regex::{Captures, Regex};

use crate::prelude::*;

pub const ALLOWED_INPUT_ATTRIBUTES: &[&str] = &[
	"type",
	"name",
	"id",
	"class",
	"multiple",
	"required",
	"aria-required",
	"data-filesize",
	"data-filetypes",
	"data-label",
	"data-maxfiles",
	"accept",
];

fn regex(pattern: &str) -> ClResult<Regex> {
	Regex::new(pattern).map_err(|e| Error::Internal(format!("regex error: {}", e)))
}

fn filter_attributes(attr_re: &Regex, attributes: &str) -> String {
	attr_re
		.captures_iter(attributes)
		.filter_map(|cap| {
			let name = cap.get(1)?.as_str().to_ascii_lowercase();
			if !ALLOWED_INPUT_ATTRIBUTES.contains(&name.as_str()) {
				debug!("Dropping attribute '{}' from upload input", name);
				return None;
			}
			let value = cap.get(2).or_else(|| cap.get(3)).map(|m| m.as_str());
			Some(match value {
				Some(value) => format!("{}=\"{}\"", name, value.replace('"', "&quot;")),
				None => name,
			})
		})
		.collect::<Vec<_>>()
		.join(" ")
}

/// Filter markup through the upload input allow-list
pub fn filter_input_markup(markup: &str) -> ClResult<String> {
	let tag_re = regex(r"(?s)<(/?)([a-zA-Z][a-zA-Z0-9-]*)([^>]*)>")?;
	let attr_re = regex(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'))?"#)?;

	let filtered = tag_re.replace_all(markup, |cap: &Captures| {
		let closing = !cap[1].is_empty();
		if closing || !cap[2].eq_ignore_ascii_case("input") {
			return String::new();
		}
		let attributes = filter_attributes(&attr_re, cap[3].trim_end_matches('/'));
		if attributes.is_empty() {
			"<input>".to_string()
		} else {
			format!("<input {}>", attributes)
		}
	});

	Ok(filtered.into_owned())
}


// vim: ts=4
