pub use dragdrop_types::prelude::*;

// vim: ts=4
