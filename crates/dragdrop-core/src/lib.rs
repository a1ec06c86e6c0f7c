//! Core infrastructure for the DragDrop uploader.
//!
//! Holds the pieces the upload field and the facade crate share: the typed
//! hook dispatcher, the settings schema registry with its page controller, the
//! field kind contract of the host form builder and HTML attribute helpers.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod field;
pub mod hooks;
pub mod prelude;
pub mod render;
pub mod settings;

// Re-export commonly used types
pub use field::{FieldKind, FieldRegistry, FormContext};
pub use hooks::{Action, Filter, Hooks};
pub use render::RenderAttributes;

// vim: ts=4
