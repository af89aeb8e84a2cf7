//! Filesystem helpers for pbxbump
//!
//! Reads a project file in one piece and replaces it atomically, so a failed
//! edit never leaves a half-written file behind.

pub mod error;
pub mod io;

pub use error::{Error, Result};
