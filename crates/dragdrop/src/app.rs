//! Plugin builder - the single construction point of the uploader
//!
//! Wires the option store, hook dispatcher, settings schema, settings page and
//! the upload field kind together. Nothing here is process-global; embedders
//! keep the returned `Plugin` and pass it down.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::prelude::*;
use dragdrop_core::field::{FieldKind, FieldRegistry};
use dragdrop_core::hooks::Hooks;
use dragdrop_core::settings::{
	FrozenSchemaRegistry, SchemaRegistry, SettingsPage, SettingsPageOpts, SettingsService,
};
use dragdrop_types::option_store::OptionStore;
use dragdrop_upload::{DragDropUpload, UploaderClientConfig, rules};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialise the `tracing` subscriber from `RUST_LOG`. Safe to call repeatedly.
pub fn init_logging() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_target(false)
		.try_init();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginOpts {
	pub page_slug: String,
	pub options_group: String,
	/// Capability required for the settings page
	pub capability: String,
	pub page_title: String,
	pub menu_title: String,
	/// Heading shown on top of the settings page
	pub heading: String,
	/// Upload ceiling reported by the platform, in bytes
	pub max_upload_bytes: u64,
	/// Editor control after which the upload controls are injected
	pub control_anchor: String,
}

impl Default for PluginOpts {
	fn default() -> Self {
		PluginOpts {
			page_slug: "easy-file-uploader".into(),
			options_group: "easy_dragdrop_options_group".into(),
			capability: "manage_options".into(),
			page_title: "Easy DragDrop Uploader".into(),
			menu_title: "Easy DragDrop Uploader".into(),
			heading: "Easy DragDrop File Uploader Settings".into(),
			max_upload_bytes: 100 * 1024 * 1024,
			control_anchor: "required".into(),
		}
	}
}

impl PluginOpts {
	/// Parse options from JSON. Missing keys keep their defaults.
	pub fn from_json(json: &str) -> ClResult<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

pub struct PluginBuilder {
	opts: PluginOpts,
	option_store: Option<Arc<dyn OptionStore>>,
	hooks: Option<Arc<Hooks>>,
}

impl Default for PluginBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl PluginBuilder {
	pub fn new() -> Self {
		init_logging();
		PluginBuilder { opts: PluginOpts::default(), option_store: None, hooks: None }
	}

	// Opts
	pub fn opts(&mut self, opts: PluginOpts) -> &mut Self {
		self.opts = opts;
		self
	}
	pub fn page_slug(&mut self, page_slug: impl Into<String>) -> &mut Self {
		self.opts.page_slug = page_slug.into();
		self
	}
	pub fn options_group(&mut self, options_group: impl Into<String>) -> &mut Self {
		self.opts.options_group = options_group.into();
		self
	}
	pub fn capability(&mut self, capability: impl Into<String>) -> &mut Self {
		self.opts.capability = capability.into();
		self
	}
	pub fn page_title(&mut self, page_title: impl Into<String>) -> &mut Self {
		self.opts.page_title = page_title.into();
		self
	}
	pub fn menu_title(&mut self, menu_title: impl Into<String>) -> &mut Self {
		self.opts.menu_title = menu_title.into();
		self
	}
	pub fn heading(&mut self, heading: impl Into<String>) -> &mut Self {
		self.opts.heading = heading.into();
		self
	}
	pub fn max_upload_bytes(&mut self, max_upload_bytes: u64) -> &mut Self {
		self.opts.max_upload_bytes = max_upload_bytes;
		self
	}
	pub fn control_anchor(&mut self, control_anchor: impl Into<String>) -> &mut Self {
		self.opts.control_anchor = control_anchor.into();
		self
	}

	// Collaborators
	pub fn option_store(&mut self, option_store: Arc<dyn OptionStore>) -> &mut Self {
		self.option_store = Some(option_store);
		self
	}
	pub fn hooks(&mut self, hooks: Arc<Hooks>) -> &mut Self {
		self.hooks = Some(hooks);
		self
	}

	pub fn build(&self) -> ClResult<Plugin> {
		info!("Easy DragDrop Uploader V{}", VERSION);

		let Some(option_store) = self.option_store.clone() else {
			error!("FATAL: No option store configured");
			return Err(Error::ConfigError("No option store configured".into()));
		};
		let hooks = self.hooks.clone().unwrap_or_default();
		let ceiling_mb = rules::ceiling_mb(self.opts.max_upload_bytes);

		// Settings schema
		let mut registry = SchemaRegistry::new();
		dragdrop_upload::settings::register_settings(&mut registry, ceiling_mb)?;
		let registry = Arc::new(registry.freeze(hooks.clone()));
		for problem in registry.validate() {
			warn!("Settings schema: {}", problem);
		}

		let settings = Arc::new(SettingsService::new(option_store));
		let settings_page = SettingsPage::new(
			SettingsPageOpts {
				page_slug: self.opts.page_slug.clone(),
				options_group: self.opts.options_group.clone(),
				capability: self.opts.capability.clone(),
				page_title: self.opts.page_title.clone(),
				menu_title: self.opts.menu_title.clone(),
				heading: self.opts.heading.clone(),
				submit_label: "Save Changes".into(),
			},
			registry.clone(),
			settings.clone(),
			hooks.clone(),
		)?;

		// Field kinds
		let upload = Arc::new(DragDropUpload::new(
			settings.clone(),
			hooks.clone(),
			ceiling_mb,
			self.opts.control_anchor.clone(),
		));
		upload.install();
		let mut fields = FieldRegistry::new();
		fields.register(upload.clone())?;

		Ok(Plugin {
			opts: self.opts.clone(),
			ceiling_mb,
			hooks,
			registry,
			settings,
			settings_page,
			fields,
			upload,
		})
	}
}

pub struct Plugin {
	opts: PluginOpts,
	ceiling_mb: i64,
	hooks: Arc<Hooks>,
	registry: Arc<FrozenSchemaRegistry>,
	settings: Arc<SettingsService>,
	settings_page: SettingsPage,
	fields: FieldRegistry,
	upload: Arc<DragDropUpload>,
}

impl std::fmt::Debug for Plugin {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Plugin")
			.field("opts", &self.opts)
			.field("ceiling_mb", &self.ceiling_mb)
			.field("fields", &self.fields)
			.finish_non_exhaustive()
	}
}

impl Plugin {
	pub fn builder() -> PluginBuilder {
		PluginBuilder::new()
	}

	/// Admin init: register every option with the store. Idempotent.
	pub fn admin_init(&self) -> usize {
		self.settings_page.register_settings()
	}

	pub fn opts(&self) -> &PluginOpts {
		&self.opts
	}

	/// Platform upload ceiling in whole megabytes
	pub fn ceiling_mb(&self) -> i64 {
		self.ceiling_mb
	}

	pub fn hooks(&self) -> &Arc<Hooks> {
		&self.hooks
	}

	pub fn schema(&self) -> &Arc<FrozenSchemaRegistry> {
		&self.registry
	}

	pub fn settings(&self) -> &Arc<SettingsService> {
		&self.settings
	}

	pub fn settings_page(&self) -> &SettingsPage {
		&self.settings_page
	}

	pub fn fields(&self) -> &FieldRegistry {
		&self.fields
	}

	pub fn field(&self, field_type: &str) -> Option<&Arc<dyn FieldKind>> {
		self.fields.get(field_type)
	}

	pub fn upload(&self) -> &Arc<DragDropUpload> {
		&self.upload
	}

	/// Uploader script options, read fresh from the store
	pub fn client_config(&self) -> UploaderClientConfig {
		UploaderClientConfig::load(&self.settings, self.ceiling_mb)
	}
}


// vim: ts=4
