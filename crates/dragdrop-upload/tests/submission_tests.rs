//! Upload field submission flow tests
//!
//! A persistence consumer subscribes to `ProcessField`, pretends to store the
//! files and hands the result back through `ProcessedUploadResult::dispatch`.

use dragdrop_core::field::{FieldKind, FormContext};
use dragdrop_core::hooks::Hooks;
use dragdrop_core::settings::SettingsService;
use dragdrop_types::form::{FieldInstance, FieldValue, FormRecord, RecordField, SubmittedField, ValidationErrors};
use dragdrop_upload::controls::CONTROL_ALLOW_MULTIPLE;
use dragdrop_upload::{DragDropUpload, FIELD_TYPE, ProcessField, ProcessedFiles, ProcessedUploadResult};
use options_adapter_memory::MemoryOptionStore;
use parking_lot::Mutex;
use std::sync::Arc;

struct Fixture {
	hooks: Arc<Hooks>,
	upload: DragDropUpload,
	dispatched: Arc<Mutex<Vec<(usize, usize)>>>,
}

fn fixture() -> Fixture {
	let hooks = Arc::new(Hooks::new());
	let settings = Arc::new(SettingsService::new(Arc::new(MemoryOptionStore::new())));
	let upload = DragDropUpload::new(settings, hooks.clone(), 32, "required");
	upload.install();

	// Persistence consumer
	let inner = hooks.clone();
	hooks.on::<ProcessField>(move |event| {
		let mut result = ProcessedUploadResult::new(event.field_id.clone());
		for name in &event.raw_values {
			result.push(format!("/srv/uploads/{}", name), format!("https://files.test/{}", name));
		}
		result.dispatch(&inner, &event.record);
	});

	let dispatched = Arc::new(Mutex::new(Vec::new()));
	let d = dispatched.clone();
	hooks.on::<ProcessedFiles>(move |event| {
		d.lock().push((event.stored_paths.len(), event.public_urls.len()));
	});

	Fixture { hooks, upload, dispatched }
}

fn record_with(field_id: &str) -> FormRecord {
	let mut record = FormRecord::new();
	record.insert(RecordField {
		id: field_id.to_string(),
		field_type: FIELD_TYPE.to_string(),
		..Default::default()
	});
	record
}

#[test]
fn test_multi_file_submission_updates_record() {
	let fx = fixture();

	let item = FieldInstance::new("files", FIELD_TYPE).with_setting(CONTROL_ALLOW_MULTIPLE, "yes");
	let html = fx.upload.render(&item, 0, &FormContext::new("apply")).expect("Failed to render");
	assert!(html.contains(r#"name="form_fields[files][]""#));

	let files = vec!["cv.pdf".to_string(), "photo.jpg".to_string()];
	let field = SubmittedField {
		id: "files".into(),
		field_type: FIELD_TYPE.into(),
		required: true,
		value: FieldValue::List(files.clone()),
		raw_value: FieldValue::List(files),
	};
	let record = record_with("files").into_shared();
	let mut errors = ValidationErrors::new();

	fx.upload.validation(&field, &record, &mut errors).expect("Validation failed");
	fx.upload.process_field(&field, &record, &mut errors).expect("Processing failed");
	assert!(errors.is_empty());

	assert_eq!(*fx.dispatched.lock(), vec![(2, 2)]);

	let record = record.read();
	let stored = record.field("files").expect("Field missing from record");
	assert_eq!(stored.value, "https://files.test/cv.pdf, https://files.test/photo.jpg");
	assert_eq!(stored.raw_value, "/srv/uploads/cv.pdf, /srv/uploads/photo.jpg");
}

#[test]
fn test_single_scalar_submission() {
	let fx = fixture();
	let field = SubmittedField {
		id: "avatar".into(),
		field_type: FIELD_TYPE.into(),
		required: false,
		value: FieldValue::from("me.png"),
		raw_value: FieldValue::from("me.png"),
	};
	let record = record_with("avatar").into_shared();
	let mut errors = ValidationErrors::new();

	fx.upload.process_field(&field, &record, &mut errors).expect("Processing failed");

	let record = record.read();
	let stored = record.field("avatar").expect("Field missing from record");
	assert_eq!(stored.value, "https://files.test/me.png");
	assert_eq!(stored.raw_value, "/srv/uploads/me.png");
}

#[test]
fn test_empty_optional_submission_dispatches_nothing() {
	let fx = fixture();
	let field = SubmittedField {
		id: "files".into(),
		field_type: FIELD_TYPE.into(),
		..Default::default()
	};
	let record = record_with("files").into_shared();
	let mut errors = ValidationErrors::new();

	fx.upload.validation(&field, &record, &mut errors).expect("Validation failed");
	fx.upload.process_field(&field, &record, &mut errors).expect("Processing failed");

	assert!(fx.dispatched.lock().is_empty());
	assert!(fx.hooks.has_action::<ProcessedFiles>());
	assert_eq!(record.read().field("files").map(|f| f.value.as_str()), Some(""));
}

#[test]
fn test_required_empty_submission_is_blocked() {
	let fx = fixture();
	let field = SubmittedField {
		id: "files".into(),
		field_type: FIELD_TYPE.into(),
		required: true,
		..Default::default()
	};
	let record = record_with("files").into_shared();
	let mut errors = ValidationErrors::new();

	let result = fx.upload.validation(&field, &record, &mut errors);
	assert!(result.is_err());
	assert_eq!(errors.get("files"), Some("Upload a valid file"));
}

#[test]
fn test_required_multi_file_without_selection_is_blocked() {
	let fx = fixture();
	let field = SubmittedField {
		id: "files".into(),
		field_type: FIELD_TYPE.into(),
		required: true,
		value: FieldValue::List(vec![String::new()]),
		raw_value: FieldValue::List(vec![String::new()]),
	};
	let record = record_with("files").into_shared();
	let mut errors = ValidationErrors::new();

	let result = fx.upload.validation(&field, &record, &mut errors);
	assert!(result.is_err());
	assert_eq!(errors.get("files"), Some("Upload a valid file"));

	fx.upload.process_field(&field, &record, &mut errors).expect("Processing failed");
	assert!(fx.dispatched.lock().is_empty());
}

// vim: ts=4
