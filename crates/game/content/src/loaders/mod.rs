//! Content loaders for reading game data from files.
//!
//! Each loader turns one RON/TOML file into `battler-core` definitions and
//! checks the references that a single file can check on its own.
//! [`ContentFactory`] assembles them into a catalog and checks the
//! cross-file references.

pub mod config;
pub mod factory;
pub mod item;
pub mod units;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;
pub use units::UnitLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
