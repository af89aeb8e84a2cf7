//! Configuration block location and field rewriting.
//!
//! Project descriptors hold many named configuration blocks of the shape:
//!
//! ```text
//! A1B2C3D4E5F6A1B2C3D4E5F6 /* Release */ = {
//!     buildSettings = {
//!         CURRENT_PROJECT_VERSION = 41;
//!     };
//! };
//! ```
//!
//! The [`locator`] module finds the byte span of one such block by name and
//! the [`field`] module rewrites a single `KEY = VALUE;` setting inside it.
//! Everything outside the rewritten value token is preserved byte for byte.

pub mod error;
pub mod field;
pub mod locator;

pub use error::{Error, Result};
pub use field::{FieldValue, MutationResult, find_field, locate_with_field, mutate};
pub use locator::{BlockSpan, DuplicatePolicy, locate, locate_all};
