//! Command implementations for pbx-cli

pub mod build_number;
pub mod marketing_version;
mod output;
pub mod release_intent;

pub use build_number::run_build_number;
pub use marketing_version::run_marketing_version;
pub use release_intent::run_release_intent;
