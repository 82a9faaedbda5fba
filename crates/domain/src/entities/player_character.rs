//! Player Character entity - the PCs sitting at the table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::ids::PlayerCharacterId;

/// A player character.
///
/// Carries the handful of sheet fields the combat tracker derives a
/// [`crate::Combatant`] from: hit points and the initiative modifier.
/// Full character sheets are out of scope for the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerCharacter {
    pub id: PlayerCharacterId,
    pub name: String,
    pub race: Option<String>,
    pub class_name: Option<String>,
    pub level: u32,
    pub max_hp: i32,
    pub armor_class: i32,
    /// Added to the d20 roll when rolling initiative.
    pub initiative_modifier: i32,

    // Metadata
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlayerCharacter {
    /// Create a new level-1 character with a fresh id and timestamps.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: PlayerCharacterId::new(),
            name: name.into(),
            race: None,
            class_name: None,
            level: 1,
            max_hp: 10,
            armor_class: 10,
            initiative_modifier: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set race
    pub fn with_race(mut self, race: impl Into<String>) -> Self {
        self.race = Some(race.into());
        self
    }

    /// Set class
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Set level
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self
    }

    /// Set maximum hit points
    pub fn with_max_hp(mut self, max_hp: i32) -> Self {
        self.max_hp = max_hp.max(1);
        self
    }

    /// Set armor class
    pub fn with_armor_class(mut self, armor_class: i32) -> Self {
        self.armor_class = armor_class;
        self
    }

    /// Set initiative modifier
    pub fn with_initiative_modifier(mut self, modifier: i32) -> Self {
        self.initiative_modifier = modifier;
        self
    }
}

/// Partial update for a [`PlayerCharacter`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PlayerCharacterPatch {
    pub name: Option<String>,
    pub race: Option<Option<String>>,
    pub class_name: Option<Option<String>>,
    pub level: Option<u32>,
    pub max_hp: Option<i32>,
    pub armor_class: Option<i32>,
    pub initiative_modifier: Option<i32>,
}

impl Entity for PlayerCharacter {
    type Id = PlayerCharacterId;
    type Patch = PlayerCharacterPatch;

    const COLLECTION: &'static str = "players";
    const KIND: &'static str = "PlayerCharacter";

    fn id(&self) -> PlayerCharacterId {
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

    fn apply(&mut self, patch: PlayerCharacterPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(race) = patch.race {
            self.race = race;
        }
        if let Some(class_name) = patch.class_name {
            self.class_name = class_name;
        }
        if let Some(level) = patch.level {
            self.level = level.max(1);
        }
        if let Some(max_hp) = patch.max_hp {
            self.max_hp = max_hp.max(1);
        }
        if let Some(armor_class) = patch.armor_class {
            self.armor_class = armor_class;
        }
        if let Some(modifier) = patch.initiative_modifier {
            self.initiative_modifier = modifier;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_character_starts_at_level_one() {
        let pc = PlayerCharacter::new("Thorin").with_class("Fighter");
        assert_eq!(pc.level, 1);
        assert_eq!(pc.class_name.as_deref(), Some("Fighter"));
    }

    #[test]
    fn level_never_drops_below_one() {
        let pc = PlayerCharacter::new("Thorin").with_level(0);
        assert_eq!(pc.level, 1);

        let mut pc = PlayerCharacter::new("Thorin").with_level(5);
        pc.apply(PlayerCharacterPatch {
            level: Some(0),
            ..Default::default()
        });
        assert_eq!(pc.level, 1);
    }

    #[test]
    fn apply_updates_combat_fields() {
        let mut pc = PlayerCharacter::new("Merric").with_max_hp(24);
        pc.apply(PlayerCharacterPatch {
            max_hp: Some(31),
            initiative_modifier: Some(3),
            ..Default::default()
        });
        assert_eq!(pc.max_hp, 31);
        assert_eq!(pc.initiative_modifier, 3);
        assert_eq!(pc.name, "Merric");
    }
}
