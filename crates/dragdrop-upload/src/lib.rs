//! Drag and drop upload field for the host form builder.
//!
//! Contains the upload business rules (override chain, extension to MIME
//! translation), the field kind with its editor controls and markup
//! allow-list, the global options schema and the events exchanged with
//! persistence consumers.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod client;
pub mod controls;
pub mod events;
pub mod field;
pub mod kses;
pub mod prelude;
pub mod rules;
pub mod settings;

pub use client::UploaderClientConfig;
pub use events::{BeforeRenderInput, ProcessField, ProcessedFiles, ProcessedUploadResult};
pub use field::{DragDropUpload, FIELD_TYPE};
pub use rules::UploadFieldConfig;

// vim: ts=4
