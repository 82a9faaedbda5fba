//! Application composition.
//!
//! `App` is the explicit context object the UI layer owns: constructed once
//! at startup, passed by reference to whatever needs it, closed at exit.
//! There are no process-wide singletons; single-instance semantics come from
//! the caller constructing exactly one `App`.

use std::path::PathBuf;
use std::sync::Arc;

use crate::infrastructure::{
    CollectionStore, FileKeyValueStore, JsonFileStore, KeyValueStore,
};
use crate::repositories::{
    CampaignRepository, EntityRepository, PlayerCharacterRepository, SpellbookRepository,
};
use crate::stores::{CombatStore, SettingsStore, Theme};

/// Startup configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Base data directory. `None` uses the platform default.
    pub data_dir: Option<PathBuf>,
    /// Theme the settings store falls back to when none is persisted,
    /// typically read from the OS by the UI layer.
    pub system_theme: Theme,
}

/// Main application state.
///
/// Holds the three entity repositories, the combat store, and settings.
/// The UI layer is the sole caller; all mutations go through these fields.
pub struct App {
    pub campaigns: CampaignRepository,
    pub players: PlayerCharacterRepository,
    pub spellbooks: SpellbookRepository,
    pub combat: CombatStore,
    pub settings: SettingsStore,
}

impl App {
    /// Wire the stores over one JSON-file store and one settings store.
    /// Spawns the write-behind drainers, so this must run on a Tokio runtime.
    pub fn new(config: AppConfig) -> Self {
        let store: Arc<dyn CollectionStore> = match &config.data_dir {
            Some(dir) => Arc::new(JsonFileStore::with_dir(dir.clone())),
            None => Arc::new(JsonFileStore::new()),
        };
        let kv: Arc<dyn KeyValueStore> = match &config.data_dir {
            Some(dir) => Arc::new(FileKeyValueStore::with_dir(dir.clone())),
            None => Arc::new(FileKeyValueStore::new()),
        };

        Self {
            campaigns: EntityRepository::new(Arc::clone(&store)),
            players: EntityRepository::new(Arc::clone(&store)),
            spellbooks: EntityRepository::new(Arc::clone(&store)),
            combat: CombatStore::new(store),
            settings: SettingsStore::new(kv, config.system_theme),
        }
    }

    /// Reload every store from disk. Previously recorded selections resolve
    /// against the freshly loaded collections.
    pub async fn load(&mut self) {
        self.campaigns.load().await;
        self.players.load().await;
        self.spellbooks.load().await;
        self.combat.load().await;
    }

    /// Drain all pending persistence work. Call at process exit.
    pub async fn close(mut self) {
        self.campaigns.close().await;
        self.players.close().await;
        self.spellbooks.close().await;
        self.combat.close().await;
    }
}
