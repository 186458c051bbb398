//! Domain types used by the client and the CLI.
//!
//! This module defines:
//!
//! - query option enums (`Language`, `PctChange`)
//! - input validation helpers for dates and series identifiers

pub mod types;

pub use types::*;
