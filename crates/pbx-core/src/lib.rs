//! Core editing operations for pbxbump.
//!
//! Two release fields live in a project descriptor's configuration blocks:
//! the build number (`CURRENT_PROJECT_VERSION`) and the marketing version
//! (`MARKETING_VERSION`). This crate loads the file, locates the block,
//! rewrites the one value and writes the file back, or reports that nothing
//! needed to change.
//!
//! ```no_run
//! use pbx_core::{BuildNumberChange, EditOptions, bump_build_number};
//!
//! let report = bump_build_number(
//!     "App.xcodeproj/project.pbxproj",
//!     "Release",
//!     BuildNumberChange::Increment,
//!     &EditOptions::default(),
//! )?;
//! println!("{} -> {}", report.old_value, report.new_value);
//! # Ok::<(), pbx_core::Error>(())
//! ```

pub mod config;
pub mod editor;
pub mod env;
pub mod error;
pub mod ops;
pub mod release;
pub mod version;

pub use config::Config;
pub use editor::{EditOutcome, EditReport, FileEditor};
pub use env::EnvFile;
pub use error::{Error, ErrorKind, Result};
pub use ops::{
    BUILD_NUMBER_KEY, EditOptions, MARKETING_VERSION_KEY, bump_build_number, set_marketing_version,
};
pub use pbx_blocks::DuplicatePolicy;
pub use release::{ReleaseIntent, Severity};
pub use version::{BuildNumber, BuildNumberChange, MarketingVersion};
