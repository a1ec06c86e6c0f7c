//! Easy DragDrop Uploader: a drag and drop file upload field for form builders.
//!
//! # Features
//!
//! - Admin settings page with global defaults
//!     - max file size, allowed file types, button label, error messages
//! - Upload field kind for the host form builder
//!     - per-field overrides of size and types
//!     - single or multiple files
//! - Typed hooks for other integrations
//!     - settings schema filters
//!     - render observer and file processing events

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

// Re-export shared types and the option store contract
pub use dragdrop_types::error;
pub use dragdrop_types::form;
pub use dragdrop_types::option_store;

// Feature crate re-exports
pub use dragdrop_core::field;
pub use dragdrop_core::hooks;
pub use dragdrop_core::render;
pub use dragdrop_core::settings;
pub use dragdrop_upload as upload;

// Local modules
pub mod app;
pub mod prelude;

pub use app::{Plugin, PluginBuilder, PluginOpts, VERSION, init_logging};

// vim: ts=4
