//! Settings subsystem: schema registry, service and admin page

pub mod page;
pub mod sanitize;
pub mod service;
pub mod types;

pub use page::{BoundSection, MenuPage, SaveReport, SettingsPage, SettingsPageOpts};
pub use service::SettingsService;
pub use types::{
	FieldRenderer, FrozenSchemaRegistry, SchemaRegistry, SettingField, SettingFieldBuilder,
	SettingSection, SettingsAfter, SettingsFields, SettingsSections,
};

// vim: ts=4
