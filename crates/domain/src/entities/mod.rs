//! Persisted entity kinds managed by the repositories.

mod campaign;
mod player_character;
mod spellbook;

pub use campaign::{Campaign, CampaignPatch};
pub use player_character::{PlayerCharacter, PlayerCharacterPatch};
pub use spellbook::{Spellbook, SpellbookPatch};
