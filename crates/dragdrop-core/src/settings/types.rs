//! Settings schema types and registry
//!
//! Sections and fields are pure data, declared once at construction time.
//! How they are drawn is decided by the settings page; how their values are
//! cleaned is decided by the option store registration.

use serde::Serialize;
use std::sync::Arc;

use crate::hooks::{Filter, Hooks};
use crate::prelude::*;
use dragdrop_types::option_store::{SanitizerKind, SettingValue};

/// Control used to edit a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum FieldRenderer {
	/// Single-line text input
	Text,
	/// Multi-line text input
	Textarea { rows: u16, cols: u16, max_length: u16 },
	/// Whole number input
	Number { min: i64, step: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingSection {
	pub id: String,
	pub title: String,
	/// Introductory text shown under the section title
	pub description: String,
}

impl SettingSection {
	pub fn new(
		id: impl Into<String>,
		title: impl Into<String>,
		description: impl Into<String>,
	) -> Self {
		Self { id: id.into(), title: title.into(), description: description.into() }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingField {
	/// Option key the field persists to; unique within the registry
	pub id: String,
	pub title: String,
	pub section_id: String,
	pub render: FieldRenderer,
	pub sanitize: SanitizerKind,
	/// Value used when nothing is stored or the store is unavailable
	pub default: SettingValue,
	pub help: Option<String>,
}

impl SettingField {
	pub fn builder(id: impl Into<String>) -> SettingFieldBuilder {
		SettingFieldBuilder::new(id)
	}
}

/// Builder for SettingField with fluent API
pub struct SettingFieldBuilder {
	id: String,
	title: Option<String>,
	section_id: Option<String>,
	render: FieldRenderer,
	sanitize: SanitizerKind,
	default: Option<SettingValue>,
	help: Option<String>,
}

impl SettingFieldBuilder {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			title: None,
			section_id: None,
			render: FieldRenderer::Text,
			sanitize: SanitizerKind::Text,
			default: None,
			help: None,
		}
	}

	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn section(mut self, section_id: impl Into<String>) -> Self {
		self.section_id = Some(section_id.into());
		self
	}

	pub fn render(mut self, render: FieldRenderer) -> Self {
		self.render = render;
		self
	}

	pub fn sanitize(mut self, sanitize: SanitizerKind) -> Self {
		self.sanitize = sanitize;
		self
	}

	pub fn default(mut self, value: SettingValue) -> Self {
		self.default = Some(value);
		self
	}

	pub fn help(mut self, help: impl Into<String>) -> Self {
		self.help = Some(help.into());
		self
	}

	pub fn build(self) -> ClResult<SettingField> {
		let title = self
			.title
			.ok_or_else(|| Error::ConfigError(format!("Setting '{}' has no title", self.id)))?;
		let section_id = self
			.section_id
			.ok_or_else(|| Error::ConfigError(format!("Setting '{}' has no section", self.id)))?;

		// Number controls persist integers, text controls persist strings
		let default = match (self.default, self.sanitize) {
			(Some(value), _) => value,
			(None, SanitizerKind::Integer { min }) => SettingValue::Int(min),
			(None, _) => SettingValue::String(String::new()),
		};
		if default.value_type() != self.sanitize.value_type() {
			return Err(Error::ConfigError(format!(
				"Default of setting '{}' does not match its sanitizer",
				self.id
			)));
		}

		Ok(SettingField {
			id: self.id,
			title,
			section_id,
			render: self.render,
			sanitize: self.sanitize,
			default,
			help: self.help,
		})
	}
}

// Filters //
//*********//

/// Extension point over the declared sections
pub struct SettingsSections;

impl Filter for SettingsSections {
	const NAME: &'static str = "settings_sections";
	type Value = Vec<SettingSection>;
}

/// Extension point over the declared fields
pub struct SettingsFields;

impl Filter for SettingsFields {
	const NAME: &'static str = "settings_fields";
	type Value = Vec<SettingField>;
}

/// Extra markup placed after the settings form
pub struct SettingsAfter;

impl Filter for SettingsAfter {
	const NAME: &'static str = "settings_after";
	type Value = String;
}

// Registry //
//**********//

/// Mutable registry used during construction
#[derive(Debug, Default)]
pub struct SchemaRegistry {
	sections: Vec<SettingSection>,
	fields: Vec<SettingField>,
}

impl SchemaRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register_section(&mut self, section: SettingSection) -> ClResult<()> {
		if self.sections.iter().any(|s| s.id == section.id) {
			return Err(Error::ConfigError(format!(
				"Section '{}' is already registered",
				section.id
			)));
		}

		debug!("Registering settings section: {}", section.id);
		self.sections.push(section);
		Ok(())
	}

	pub fn register_field(&mut self, field: SettingField) -> ClResult<()> {
		if self.fields.iter().any(|f| f.id == field.id) {
			return Err(Error::ConfigError(format!("Setting '{}' is already registered", field.id)));
		}
		if !self.sections.iter().any(|s| s.id == field.section_id) {
			return Err(Error::ConfigError(format!(
				"Setting '{}' references unknown section '{}'",
				field.id, field.section_id
			)));
		}

		debug!("Registering setting field: {}", field.id);
		self.fields.push(field);
		Ok(())
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Freeze the registry. Reads go through the filters of `hooks` from now on.
	pub fn freeze(self, hooks: Arc<Hooks>) -> FrozenSchemaRegistry {
		info!(
			"Freezing settings schema with {} section(s) and {} field(s)",
			self.sections.len(),
			self.fields.len()
		);
		FrozenSchemaRegistry { sections: self.sections, fields: self.fields, hooks }
	}
}

/// Immutable registry shared by the settings page and field kinds
#[derive(Debug)]
pub struct FrozenSchemaRegistry {
	sections: Vec<SettingSection>,
	fields: Vec<SettingField>,
	hooks: Arc<Hooks>,
}

impl FrozenSchemaRegistry {
	/// Declared sections in order, after the `SettingsSections` filters
	pub fn sections(&self) -> Vec<SettingSection> {
		self.hooks.apply::<SettingsSections>(self.sections.clone())
	}

	/// Declared fields in order, after the `SettingsFields` filters
	pub fn fields(&self) -> Vec<SettingField> {
		self.hooks.apply::<SettingsFields>(self.fields.clone())
	}

	pub fn field(&self, id: &str) -> Option<SettingField> {
		self.fields().into_iter().find(|f| f.id == id)
	}

	pub fn section(&self, id: &str) -> Option<SettingSection> {
		self.sections().into_iter().find(|s| s.id == id)
	}

	/// Report schema problems introduced after construction (usually by filters).
	///
	/// Never fails; the caller decides whether to log or skip.
	pub fn validate(&self) -> Vec<Error> {
		let sections = self.sections();
		let fields = self.fields();
		let mut problems = Vec::new();

		for (i, section) in sections.iter().enumerate() {
			if sections[..i].iter().any(|s| s.id == section.id) {
				problems
					.push(Error::ConfigError(format!("Duplicate section id '{}'", section.id)));
			}
		}

		for (i, field) in fields.iter().enumerate() {
			if fields[..i].iter().any(|f| f.id == field.id) {
				problems.push(Error::ConfigError(format!("Duplicate setting id '{}'", field.id)));
			}
			if !sections.iter().any(|s| s.id == field.section_id) {
				problems.push(Error::ConfigError(format!(
					"Setting '{}' references unknown section '{}'",
					field.id, field.section_id
				)));
			}
		}

		problems
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn text_field(id: &str, section: &str) -> ClResult<SettingField> {
		SettingField::builder(id).title(id).section(section).build()
	}

	fn registry() -> ClResult<SchemaRegistry> {
		let mut registry = SchemaRegistry::new();
		registry.register_section(SettingSection::new("general", "General", "Intro"))?;
		registry.register_field(text_field("label", "general")?)?;
		Ok(registry)
	}

	#[test]
	fn test_builder_requires_title_and_section() {
		assert!(SettingField::builder("x").section("general").build().is_err());
		assert!(SettingField::builder("x").title("X").build().is_err());
	}

	#[test]
	fn test_builder_defaults_follow_sanitizer() {
		let Ok(field) = SettingField::builder("size")
			.title("Size")
			.section("general")
			.sanitize(SanitizerKind::Integer { min: 1 })
			.build()
		else {
			unreachable!("valid field");
		};
		assert_eq!(field.default, SettingValue::Int(1));
	}

	#[test]
	fn test_builder_rejects_mismatched_default() {
		let result = SettingField::builder("size")
			.title("Size")
			.section("general")
			.sanitize(SanitizerKind::Integer { min: 1 })
			.default(SettingValue::from("ten"))
			.build();
		assert!(matches!(result, Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_register_rejects_duplicates_and_unknown_sections() -> ClResult<()> {
		let mut registry = registry()?;
		assert!(registry.register_field(text_field("label", "general")?).is_err());
		assert!(registry.register_field(text_field("other", "missing")?).is_err());
		assert!(
			registry
				.register_section(SettingSection::new("general", "Again", ""))
				.is_err()
		);
		assert_eq!(registry.len(), 1);
		Ok(())
	}

	#[test]
	fn test_filters_extend_frozen_registry() -> ClResult<()> {
		let hooks = Arc::new(Hooks::new());
		let extra = text_field("extra", "general")?;
		hooks.add_filter::<SettingsFields>(move |mut fields| {
			fields.push(extra.clone());
			fields
		});

		let frozen = registry()?.freeze(hooks);
		let ids: Vec<String> = frozen.fields().into_iter().map(|f| f.id).collect();
		assert_eq!(ids, vec!["label", "extra"]);
		assert!(frozen.field("extra").is_some());
		assert!(frozen.validate().is_empty());
		Ok(())
	}

	#[test]
	fn test_validate_reports_filter_mistakes() -> ClResult<()> {
		let hooks = Arc::new(Hooks::new());
		let orphan = text_field("orphan", "nowhere")?;
		let dup = text_field("label", "general")?;
		hooks.add_filter::<SettingsFields>(move |mut fields| {
			fields.push(orphan.clone());
			fields.push(dup.clone());
			fields
		});

		let problems = registry()?.freeze(hooks).validate();
		assert_eq!(problems.len(), 2);
		Ok(())
	}
}

// vim: ts=4
