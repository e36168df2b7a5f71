//! Command implementations for battler-sim.
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod catalog;
mod replay;

pub use catalog::Catalog;
pub use replay::Replay;

use std::path::PathBuf;

use battler_content::ContentFactory;

/// Content directory given on the command line, or the bundled data.
fn content(data_dir: Option<PathBuf>) -> ContentFactory {
    data_dir.map_or_else(ContentFactory::bundled, |dir| ContentFactory::new(dir))
}
