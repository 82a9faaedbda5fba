//! Core domain types for the DM Screen campaign manager.
//!
//! This crate is a leaf: it knows nothing about persistence or the UI.
//! Entities carry their own identity and timestamps; the combat session
//! model enforces turn-order invariants; everything else lives in
//! `dmscreen-engine`.

pub mod combat;
pub mod entities;
pub mod entity;
pub mod error;
pub mod ids;

pub use combat::{CombatPhase, CombatSession, Combatant, CombatantKind, Condition};
pub use entities::{
    Campaign, CampaignPatch, PlayerCharacter, PlayerCharacterPatch, Spellbook, SpellbookPatch,
};
pub use entity::Entity;
pub use error::DomainError;
pub use ids::{CampaignId, CombatantId, PlayerCharacterId, SpellbookId};
