pub use dragdrop_core::prelude::*;

// vim: ts=4
