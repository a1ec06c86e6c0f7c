//! Plugin integration tests
//!
//! Exercises the assembled plugin the way a host does: admin init, settings
//! form posts, form editor control injection and public form rendering.

use dragdrop::error::{ClResult, Error};
use dragdrop::field::{FieldKind, FormContext};
use dragdrop::form::{ControlDefinition, ControlHost, ControlKind, ControlStack, FieldInstance};
use dragdrop::option_store::{OptionStore, RegisteredOption, SettingValue};
use dragdrop::upload::controls::{CONTROL_FILE_TYPES, CONTROL_MAX_FILE_SIZE, CONTROL_MAX_FILES};
use dragdrop::upload::settings::{
	OPTION_FILE_SIZE_ERROR, OPTION_FILE_TYPE_ERROR, OPTION_FILE_TYPES_ALLOWED, OPTION_MAX_FILE_SIZE,
};
use dragdrop::{Plugin, PluginBuilder};
use options_adapter_memory::MemoryOptionStore;
use std::collections::HashMap;
use std::sync::Arc;

const ADMIN: [&str; 1] = ["manage_options"];

fn plugin_with(store: Arc<dyn OptionStore>) -> Plugin {
	PluginBuilder::new()
		.max_upload_bytes(64 * 1024 * 1024)
		.option_store(store)
		.build()
		.expect("Failed to build plugin")
}

fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
	pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

struct FormWidget {
	stack: ControlStack,
}

impl ControlHost for FormWidget {
	fn form_fields(&self) -> ClResult<ControlStack> {
		Ok(self.stack.clone())
	}

	fn update_form_fields(&mut self, stack: ControlStack) {
		self.stack = stack;
	}
}

struct OfflineStore;

impl OptionStore for OfflineStore {
	fn read(&self, _key: &str) -> ClResult<Option<SettingValue>> {
		Err(Error::PersistenceUnavailable("database offline".into()))
	}
	fn write(&self, _key: &str, _value: SettingValue) -> ClResult<bool> {
		Err(Error::PersistenceUnavailable("database offline".into()))
	}
	fn register(&self, _key: &str, _option: RegisteredOption) -> ClResult<bool> {
		Err(Error::PersistenceUnavailable("database offline".into()))
	}
	fn registration(&self, _key: &str) -> Option<RegisteredOption> {
		None
	}
}

#[test]
fn test_global_defaults_reach_the_field() {
	let store = Arc::new(MemoryOptionStore::new());
	let plugin = plugin_with(store);
	plugin.admin_init();

	let report = plugin
		.settings_page()
		.save(&ADMIN, &form(&[(OPTION_MAX_FILE_SIZE, "10"), (OPTION_FILE_TYPES_ALLOWED, "jpg, png")]))
		.expect("Failed to save");
	assert_eq!(report.saved.len(), 2);

	let field = plugin.field("easy-dragdrop-upload").expect("Upload field not registered");
	let item = FieldInstance::new("photos", "easy-dragdrop-upload");
	let html = field.render(&item, 0, &FormContext::new("contact")).expect("Failed to render");
	assert!(html.contains(r#"data-filesize="10""#));
	assert!(html.contains(r#"data-filetypes="image/jpeg,image/png""#));

	// Per-field values win over the global defaults
	let item = item.with_setting(CONTROL_MAX_FILE_SIZE, "25").with_setting(CONTROL_FILE_TYPES, "pdf");
	let html = field.render(&item, 0, &FormContext::new("contact")).expect("Failed to render");
	assert!(html.contains(r#"data-filesize="25""#));
	assert!(html.contains(r#"data-filetypes="application/pdf""#));
}

#[test]
fn test_platform_ceiling_without_options() {
	let plugin = plugin_with(Arc::new(MemoryOptionStore::new()));
	let field = plugin.field("easy-dragdrop-upload").expect("Upload field not registered");
	let html = field
		.render(&FieldInstance::new("cv", "easy-dragdrop-upload"), 0, &FormContext::default())
		.expect("Failed to render");
	assert!(html.contains(r#"data-filesize="64""#));
}

#[test]
fn test_error_messages_are_capped() {
	let plugin = plugin_with(Arc::new(MemoryOptionStore::new()));
	plugin.admin_init();

	let long = "File is way too large. ".repeat(10);
	assert_eq!(long.chars().count(), 230);
	plugin
		.settings_page()
		.save(&ADMIN, &form(&[(OPTION_FILE_SIZE_ERROR, long.as_str()), (OPTION_FILE_TYPE_ERROR, "Wrong type")]))
		.expect("Failed to save");

	let config = plugin.client_config();
	assert!(config.file_size_error.chars().count() <= 120);
	assert!(config.file_size_error.starts_with("File is way too large."));
	assert_eq!(config.file_type_error, "Wrong type");
}

#[test]
fn test_settings_page_markup() {
	let plugin = plugin_with(Arc::new(MemoryOptionStore::new()));
	let html = plugin.settings_page().render_page(&ADMIN).expect("Failed to render page");

	assert!(html.contains("<h2>Easy DragDrop File Uploader Settings</h2>"));
	assert!(html.contains(
		r#"name="easy_dragdrop_file_types_allowed" value=""><p>Default allowed file types"#
	));
	assert!(html.contains(r#"name="easy_dragdrop_button_label" value=""></td>"#));
	assert!(html.contains(r#"</textarea><p class="help-text">Enter an error message"#));
}

#[test]
fn test_store_outage_falls_back_to_defaults() {
	let plugin = plugin_with(Arc::new(OfflineStore));
	assert_eq!(plugin.admin_init(), 0);

	let html = plugin.settings_page().render_page(&ADMIN).expect("Failed to render page");
	assert!(html.contains(r#"name="easy_dragdrop_max_file_size" value="64""#));

	let report = plugin
		.settings_page()
		.save(&ADMIN, &form(&[(OPTION_MAX_FILE_SIZE, "10")]))
		.expect("Failed to save");
	assert_eq!(report.rejected, vec![OPTION_MAX_FILE_SIZE.to_string()]);

	let config = plugin.client_config();
	assert_eq!(config.max_file_size, 64);
	assert_eq!(config.button_label, "");
}

#[test]
fn test_editor_controls_injected_after_required() {
	let store = Arc::new(MemoryOptionStore::new());
	store.write(OPTION_MAX_FILE_SIZE, SettingValue::Int(12)).expect("Failed to write");
	let plugin = plugin_with(store);

	let mut widget = FormWidget {
		stack: ControlStack::new(vec![
			ControlDefinition::new("field_type", "Type", ControlKind::Select),
			ControlDefinition::new("field_label", "Label", ControlKind::Text),
			ControlDefinition::new("required", "Required", ControlKind::Switcher),
			ControlDefinition::new("width", "Column Width", ControlKind::Select),
		]),
	};
	let field = plugin.field("easy-dragdrop-upload").expect("Upload field not registered");
	field.update_controls(&mut widget);

	let names = widget.stack.names();
	assert_eq!(names.len(), 8);
	assert_eq!(names[3], CONTROL_MAX_FILE_SIZE);
	assert_eq!(names[6], CONTROL_MAX_FILES);
	assert_eq!(names[7], "width");

	let size = widget.stack.get(CONTROL_MAX_FILE_SIZE).expect("Size control missing");
	assert_eq!(size.default, Some(serde_json::Value::from("12")));
	assert_eq!(size.options.len(), 64);
}

// vim: ts=4
