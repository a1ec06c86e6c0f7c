//! Events published and consumed by the upload field

use dragdrop_core::hooks::{Action, Hooks};

use crate::prelude::*;
use dragdrop_types::form::SharedRecord;

/// Rendered attribute string of an upload input, before the allow-list runs.
///
/// Observers only; subscribers cannot change or block the output.
#[derive(Debug, Clone)]
pub struct BeforeRenderInput {
	pub field_id: String,
	pub attributes: String,
}

impl Action for BeforeRenderInput {
	const NAME: &'static str = "easy_dragdrop_before_render_input";
}

/// A submitted upload field with at least one value, ready for persistence
#[derive(Debug, Clone)]
pub struct ProcessField {
	pub field_id: String,
	/// Submitted values in upload order
	pub raw_values: Vec<String>,
	pub record: SharedRecord,
}

impl Action for ProcessField {
	const NAME: &'static str = "easy_dragdrop_process_field";
}

/// Files of a field were stored; the record should show them
#[derive(Debug, Clone)]
pub struct ProcessedFiles {
	pub field_id: String,
	pub stored_paths: Vec<String>,
	pub public_urls: Vec<String>,
	pub record: SharedRecord,
}

impl Action for ProcessedFiles {
	const NAME: &'static str = "easy_dragdrop_processed_files";
}

/// Outcome of storing the files of one field, in upload order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedUploadResult {
	pub field_id: String,
	pub stored_paths: Vec<String>,
	pub public_urls: Vec<String>,
}

impl ProcessedUploadResult {
	pub fn new(field_id: impl Into<String>) -> Self {
		Self { field_id: field_id.into(), ..Default::default() }
	}

	/// Add one stored file
	pub fn push(&mut self, stored_path: impl Into<String>, public_url: impl Into<String>) {
		self.stored_paths.push(stored_path.into());
		self.public_urls.push(public_url.into());
	}

	pub fn len(&self) -> usize {
		self.stored_paths.len()
	}

	pub fn is_empty(&self) -> bool {
		self.stored_paths.is_empty()
	}

	/// Hand the result over as a `ProcessedFiles` event.
	///
	/// Subscribers lock `record` for writing, so the caller must not hold a
	/// lock on it. Returns the number of subscribers notified.
	pub fn dispatch(self, hooks: &Hooks, record: &SharedRecord) -> usize {
		info!("Dispatching {} processed file(s) for field '{}'", self.len(), self.field_id);
		hooks.emit(&ProcessedFiles {
			field_id: self.field_id,
			stored_paths: self.stored_paths,
			public_urls: self.public_urls,
			record: record.clone(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use dragdrop_types::form::FormRecord;
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	#[test]
	fn test_dispatch_moves_result_into_event() {
		let hooks = Hooks::new();
		let seen = Arc::new(AtomicUsize::new(0));
		let s = seen.clone();
		hooks.on::<ProcessedFiles>(move |event| {
			assert_eq!(event.field_id, "files");
			assert_eq!(event.public_urls, vec!["https://cdn.test/a.png", "https://cdn.test/b.png"]);
			s.fetch_add(event.stored_paths.len(), Ordering::SeqCst);
		});

		let mut result = ProcessedUploadResult::new("files");
		result.push("/uploads/a.png", "https://cdn.test/a.png");
		result.push("/uploads/b.png", "https://cdn.test/b.png");

		let record = FormRecord::new().into_shared();
		assert_eq!(result.dispatch(&hooks, &record), 1);
		assert_eq!(seen.load(Ordering::SeqCst), 2);
	}
}

// vim: ts=4
