//! Error type shared by all DragDrop crates

use std::fmt;

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// Schema problem: unknown section reference, duplicate id, broken template
	ConfigError(String),
	ValidationError(String),
	/// A required upload field was submitted without a value (carries the field id)
	RequiredFieldMissing(Box<str>),
	/// The option store could not be read or written
	PersistenceUnavailable(String),
	PermissionDenied,
	NotFound,
	Internal(String),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::RequiredFieldMissing(field_id) => {
				write!(f, "required field '{}' is missing", field_id)
			}
			Error::PersistenceUnavailable(msg) => write!(f, "option store unavailable: {}", msg),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::NotFound => write!(f, "not found"),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
		}
	}
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Error::Internal(format!("json error: {}", err))
	}
}


// vim: ts=4
