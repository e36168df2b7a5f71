//! Combat resolution.
//!
//! - `damage`: mitigation, amplification, shield absorption, lethality
//! - `healing`: heals, HP costs, shield grants
//! - `attack`: the shared auto-attack every champion wraps

pub mod attack;
pub mod damage;
pub mod healing;

pub use attack::{AttackReport, WOUNDED_DEBUFF, auto_attack};
pub use damage::{
    DamageReport, DamageSource, DamageType, amplification, amplify, apply_damage, mitigate,
    percent_of,
};
pub use healing::{grant_shield, heal, pay_hp_cost};
