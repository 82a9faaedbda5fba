//! Entity repositories - CRUD plus single-selection over one entity kind.

mod entity;

pub use entity::EntityRepository;

use dmscreen_domain::{Campaign, PlayerCharacter, Spellbook};

pub type CampaignRepository = EntityRepository<Campaign>;
pub type PlayerCharacterRepository = EntityRepository<PlayerCharacter>;
pub type SpellbookRepository = EntityRepository<Spellbook>;
