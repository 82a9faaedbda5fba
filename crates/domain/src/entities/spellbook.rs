//! Spellbook entity - a named list of prepared/known spells.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::ids::SpellbookId;

/// A spellbook built by a player.
///
/// Spell entries are the display names of spells from the rules compendium
/// (the compendium itself is read-only content, not an entity). The list
/// keeps insertion order for display but never holds duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spellbook {
    pub id: SpellbookId,
    pub name: String,
    /// Display name of the character this book belongs to.
    pub owner: Option<String>,
    pub spell_names: Vec<String>,

    // Metadata
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Spellbook {
    /// Create a new, empty spellbook with a fresh id and timestamps.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: SpellbookId::new(),
            name: name.into(),
            owner: None,
            spell_names: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the owning character's display name
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Add a spell by name. Returns false when it was already present.
    pub fn add_spell(&mut self, spell_name: impl Into<String>) -> bool {
        let spell_name = spell_name.into();
        if self.spell_names.iter().any(|s| *s == spell_name) {
            return false;
        }
        self.spell_names.push(spell_name);
        self.updated_at = Utc::now();
        true
    }

    /// Remove a spell by name. Returns false when it was not present.
    pub fn remove_spell(&mut self, spell_name: &str) -> bool {
        let before = self.spell_names.len();
        self.spell_names.retain(|s| s != spell_name);
        if self.spell_names.len() == before {
            return false;
        }
        self.updated_at = Utc::now();
        true
    }

    pub fn contains_spell(&self, spell_name: &str) -> bool {
        self.spell_names.iter().any(|s| s == spell_name)
    }
}

/// Partial update for a [`Spellbook`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct SpellbookPatch {
    pub name: Option<String>,
    pub owner: Option<Option<String>>,
    /// Wholesale replacement of the spell list (deduplicated, order kept).
    pub spell_names: Option<Vec<String>>,
}

impl Entity for Spellbook {
    type Id = SpellbookId;
    type Patch = SpellbookPatch;

    const COLLECTION: &'static str = "spellbooks";
    const KIND: &'static str = "Spellbook";

    fn id(&self) -> SpellbookId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn apply(&mut self, patch: SpellbookPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(owner) = patch.owner {
            self.owner = owner;
        }
        if let Some(spell_names) = patch.spell_names {
            self.spell_names.clear();
            for spell in spell_names {
                if !self.spell_names.contains(&spell) {
                    self.spell_names.push(spell);
                }
            }
        }
        self.updated_at = Utc::now();
    }
}
