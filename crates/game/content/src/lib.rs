//! Data-driven content definitions and loaders.
//!
//! This crate houses the static battler content and the loaders that read it:
//! - Unit templates (data-driven via RON)
//! - Item catalogs (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//!
//! Content is consumed read-only by the engine through the catalog oracles
//! and never appears in game state. All loaders deserialize `battler-core`
//! types directly through its `serde` feature.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, ItemLoader, LoadResult, UnitLoader};
