//! Settings page controller
//!
//! Composes the schema registry with the settings service: registers the
//! options, binds fields to their sections, renders the admin page and
//! handles the options form post.

use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

use super::sanitize;
use super::service::SettingsService;
use super::types::{FieldRenderer, FrozenSchemaRegistry, SettingField, SettingSection, SettingsAfter};
use crate::hooks::Hooks;
use crate::prelude::*;
use crate::render::{esc_attr, esc_html};
use dragdrop_types::option_store::SettingValue;

const SETTINGS_TEMPLATE: &str = include_str!("../../templates/settings.html.hbs");
const SETTINGS_TEMPLATE_NAME: &str = "settings";

#[derive(Debug, Clone)]
pub struct SettingsPageOpts {
	pub page_slug: String,
	pub options_group: String,
	/// Capability required to view and save the page
	pub capability: String,
	pub page_title: String,
	pub menu_title: String,
	/// Heading shown at the top of the page
	pub heading: String,
	pub submit_label: String,
}

/// Admin menu registration data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuPage {
	pub page_title: String,
	pub menu_title: String,
	pub capability: String,
	pub slug: String,
}

/// A section attached to the page with its fields in declaration order
#[derive(Debug, Clone)]
pub struct BoundSection {
	pub page: String,
	pub section: SettingSection,
	pub fields: Vec<SettingField>,
}

/// Outcome of an options form post
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
	pub saved: Vec<String>,
	pub rejected: Vec<String>,
}

#[derive(Serialize)]
struct RenderedSection {
	id: String,
	title: String,
	body: String,
}

pub struct SettingsPage {
	opts: SettingsPageOpts,
	registry: Arc<FrozenSchemaRegistry>,
	settings: Arc<SettingsService>,
	hooks: Arc<Hooks>,
	handlebars: Handlebars<'static>,
}

impl std::fmt::Debug for SettingsPage {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingsPage").field("opts", &self.opts).finish_non_exhaustive()
	}
}

fn has_capability<S: AsRef<str>>(capabilities: &[S], required: &str) -> bool {
	capabilities.iter().any(|c| c.as_ref() == required)
}

impl SettingsPage {
	pub fn new(
		opts: SettingsPageOpts,
		registry: Arc<FrozenSchemaRegistry>,
		settings: Arc<SettingsService>,
		hooks: Arc<Hooks>,
	) -> ClResult<Self> {
		let mut handlebars = Handlebars::new();
		handlebars.set_strict_mode(true);
		handlebars
			.register_template_string(SETTINGS_TEMPLATE_NAME, SETTINGS_TEMPLATE)
			.map_err(|e| Error::ConfigError(format!("Invalid settings template: {}", e)))?;

		Ok(Self { opts, registry, settings, hooks, handlebars })
	}

	pub fn opts(&self) -> &SettingsPageOpts {
		&self.opts
	}

	pub fn menu_page(&self) -> MenuPage {
		MenuPage {
			page_title: self.opts.page_title.clone(),
			menu_title: self.opts.menu_title.clone(),
			capability: self.opts.capability.clone(),
			slug: self.opts.page_slug.clone(),
		}
	}

	/// Register every field's option with the store.
	///
	/// Returns the number of new registrations; a repeated call returns 0.
	pub fn register_settings(&self) -> usize {
		let registered = self
			.registry
			.fields()
			.iter()
			.filter(|field| self.settings.register(&self.opts.options_group, field))
			.count();
		if registered > 0 {
			info!("Registered {} option(s) in group '{}'", registered, self.opts.options_group);
		}
		registered
	}

	/// Attach sections to the page and fields to their sections.
	///
	/// Fields with an unknown section and repeated ids are logged and left out.
	pub fn bind_sections_and_fields(&self) -> Vec<BoundSection> {
		let mut bound: Vec<BoundSection> = Vec::new();
		for section in self.registry.sections() {
			if bound.iter().any(|b| b.section.id == section.id) {
				warn!("Skipping duplicate settings section '{}'", section.id);
				continue;
			}
			bound.push(BoundSection { page: self.opts.page_slug.clone(), section, fields: Vec::new() });
		}

		let mut seen: Vec<String> = Vec::new();
		for field in self.registry.fields() {
			if seen.contains(&field.id) {
				warn!("Skipping duplicate setting '{}'", field.id);
				continue;
			}
			let Some(target) = bound.iter_mut().find(|b| b.section.id == field.section_id) else {
				warn!(
					"Skipping setting '{}': unknown section '{}'",
					field.id, field.section_id
				);
				continue;
			};
			seen.push(field.id.clone());
			target.fields.push(field);
		}

		bound
	}

	/// Render one field: a single control followed by its help text.
	///
	/// The current value is read from the store on every call.
	pub fn render_field(&self, field: &SettingField) -> ClResult<String> {
		let control = match field.render {
			FieldRenderer::Text => {
				let value = self.current_string(field);
				let value = sanitize::sanitize_text_field(&value)?;
				format!(r#"<input type="text" name="{}" value="{}">"#, esc_attr(&field.id), esc_attr(&value))
			}
			FieldRenderer::Textarea { rows, cols, max_length } => {
				let value = self.current_string(field);
				let value = sanitize::sanitize_textarea_field(&value, None)?;
				format!(
					r#"<textarea name="{}" rows="{}" cols="{}" maxlength="{}">{}</textarea>"#,
					esc_attr(&field.id),
					rows,
					cols,
					max_length,
					esc_html(&value)
				)
			}
			FieldRenderer::Number { min, step } => {
				let default = field.default.as_int().unwrap_or(min);
				let value = self.settings.get_int_or(&field.id, default);
				format!(
					r#"<input type="number" name="{}" value="{}" min="{}" step="{}">"#,
					esc_attr(&field.id),
					value,
					min,
					step
				)
			}
		};

		let Some(help) = field.help.as_deref() else {
			return Ok(control);
		};
		let help_open = match field.render {
			FieldRenderer::Text => "<p>",
			FieldRenderer::Textarea { .. } => r#"<p class="help-text">"#,
			FieldRenderer::Number { .. } => r#"<p class="description">"#,
		};

		Ok(format!("{}{}{}</p>", control, help_open, esc_html(help)))
	}

	fn current_string(&self, field: &SettingField) -> String {
		let default = field.default.as_string().unwrap_or_default();
		self.settings.get_string_or(&field.id, &default)
	}

	/// Render the body of a section: description, then one table row per field.
	///
	/// A field that fails to render is logged and left out.
	pub fn render_section(&self, bound: &BoundSection) -> String {
		let mut out = format!("<p>{}</p>", esc_html(&bound.section.description));
		out.push_str(r#"<table class="form-table" role="presentation">"#);
		for field in &bound.fields {
			match self.render_field(field) {
				Ok(control) => out.push_str(&format!(
					r#"<tr><th scope="row">{}</th><td>{}</td></tr>"#,
					esc_html(&field.title),
					control
				)),
				Err(e) => warn!("Skipping setting '{}' on render: {}", field.id, e),
			}
		}
		out.push_str("</table>");
		out
	}

	/// Render the full settings page for a caller holding `capabilities`
	pub fn render_page<S: AsRef<str>>(&self, capabilities: &[S]) -> ClResult<String> {
		if !has_capability(capabilities, &self.opts.capability) {
			warn!("Settings page denied: missing capability '{}'", self.opts.capability);
			return Err(Error::PermissionDenied);
		}

		let sections: Vec<RenderedSection> = self
			.bind_sections_and_fields()
			.iter()
			.map(|bound| RenderedSection {
				id: bound.section.id.clone(),
				title: bound.section.title.clone(),
				body: self.render_section(bound),
			})
			.collect();

		let context = json!({
			"title": self.opts.heading,
			"options_group": self.opts.options_group,
			"page_slug": self.opts.page_slug,
			"submit_label": self.opts.submit_label,
			"sections": sections,
			"after": self.hooks.apply::<SettingsAfter>(String::new()),
		});

		self.handlebars
			.render(SETTINGS_TEMPLATE_NAME, &context)
			.map_err(|e| Error::ConfigError(format!("Failed to render settings page: {}", e)))
	}

	/// Handle the options form post.
	///
	/// Only bound fields are saved; unknown form keys are ignored.
	pub fn save<S: AsRef<str>>(
		&self,
		capabilities: &[S],
		form: &HashMap<String, String>,
	) -> ClResult<SaveReport> {
		if !has_capability(capabilities, &self.opts.capability) {
			return Err(Error::PermissionDenied);
		}

		let mut report = SaveReport::default();
		for field in self.bind_sections_and_fields().into_iter().flat_map(|b| b.fields) {
			let Some(raw) = form.get(&field.id) else {
				continue;
			};
			if self.settings.set(&field.id, raw) {
				report.saved.push(field.id);
			} else {
				report.rejected.push(field.id);
			}
		}

		info!(
			"Settings saved: {} accepted, {} rejected",
			report.saved.len(),
			report.rejected.len()
		);
		Ok(report)
	}

	/// Current value of a setting with its declared default
	pub fn value(&self, id: &str) -> Option<SettingValue> {
		let field = self.registry.field(id)?;
		Some(self.settings.get_or(id, field.default))
	}
}


// vim: ts=4
