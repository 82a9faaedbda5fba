//! Stores - combat session and settings state containers.

pub mod combat;
pub mod settings;

pub use combat::CombatStore;
pub use settings::{SettingsStore, Theme};
