//! Campaign entity - one table's ongoing game.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::ids::CampaignId;

/// A campaign the group is running.
///
/// Campaigns group player characters and combat encounters; the UI keeps at
/// most one campaign selected at a time (tracked by the repository, not
/// here).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    pub description: Option<String>,
    /// Display name of whoever runs the table.
    pub game_master: Option<String>,
    /// Free-form session notes.
    pub notes: String,

    // Metadata
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    /// Create a new campaign with a fresh id and timestamps.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CampaignId::new(),
            name: name.into(),
            description: None,
            game_master: None,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the campaign description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the game master's display name
    pub fn with_game_master(mut self, game_master: impl Into<String>) -> Self {
        self.game_master = Some(game_master.into());
        self
    }
}

/// Partial update for a [`Campaign`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct CampaignPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub game_master: Option<Option<String>>,
    pub notes: Option<String>,
}

impl Entity for Campaign {
    type Id = CampaignId;
    type Patch = CampaignPatch;

    const COLLECTION: &'static str = "campaigns";
    const KIND: &'static str = "Campaign";

    fn id(&self) -> CampaignId {
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

    fn apply(&mut self, patch: CampaignPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(game_master) = patch.game_master {
            self.game_master = game_master;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_campaign_stamps_matching_timestamps() {
        let campaign = Campaign::new("Lost Mine of Phandelver");
        assert_eq!(campaign.created_at, campaign.updated_at);
        assert_eq!(campaign.name, "Lost Mine of Phandelver");
        assert!(campaign.description.is_none());
    }

    #[test]
    fn apply_merges_only_populated_fields() {
        let mut campaign = Campaign::new("Lost Mine").with_game_master("Meg");
        campaign.apply(CampaignPatch {
            name: Some("Lost Mine of Phandelver".into()),
            ..Default::default()
        });
        assert_eq!(campaign.name, "Lost Mine of Phandelver");
        assert_eq!(campaign.game_master.as_deref(), Some("Meg"));
    }

    #[test]
    fn apply_refreshes_updated_at() {
        let mut campaign = Campaign::new("Curse of Strahd");
        let before = campaign.updated_at;
        campaign.apply(CampaignPatch {
            notes: Some("Party reached Vallaki".into()),
            ..Default::default()
        });
        assert!(campaign.updated_at > before);
        assert_eq!(campaign.created_at, before);
    }

    #[test]
    fn patch_can_clear_optional_fields() {
        let mut campaign = Campaign::new("Curse of Strahd").with_description("Gothic horror");
        campaign.apply(CampaignPatch {
            description: Some(None),
            ..Default::default()
        });
        assert!(campaign.description.is_none());
    }
}
