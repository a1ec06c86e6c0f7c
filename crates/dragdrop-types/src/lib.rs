//! Shared types, the option store contract and host form boundary types for the
//! DragDrop uploader.
//!
//! This crate has no knowledge of rendering or event dispatch. It only defines
//! what the host provides and what the other crates exchange.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod error;
pub mod form;
pub mod option_store;
pub mod prelude;

// vim: ts=4
