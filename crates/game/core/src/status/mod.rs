//! Debuff and aura lifecycle.
mod aura;
mod debuff;

pub use aura::{aura_reaches, cleanup_auras, project_auras, refresh_auras};
pub use debuff::{IMMUNITY_DEBUFF, apply_debuff, process_debuffs, remove_debuff};
