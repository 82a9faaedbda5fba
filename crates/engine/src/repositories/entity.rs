//! Generic entity repository.
//!
//! One instance per entity kind (campaigns, players, spellbooks). Holds the
//! collection in memory as the source of truth, tracks at most one selected
//! id, and queues a snapshot for the write-behind drainer after every
//! mutation.
//!
//! Failure semantics: storage failures never reach the caller. A failed or
//! missing load degrades to an empty collection with a warning; lookup
//! misses on `update`/`delete` are silent no-ops.

use std::sync::Arc;

use dmscreen_domain::Entity;

use crate::infrastructure::{CollectionStore, WriteBehind};

/// CRUD and selection over one entity collection.
pub struct EntityRepository<E: Entity> {
    store: Arc<dyn CollectionStore>,
    queue: WriteBehind,
    entities: Vec<E>,
    selected: Option<E::Id>,
}

impl<E: Entity> EntityRepository<E> {
    /// Create an empty repository over `store`. Spawns the write-behind
    /// drainer for this kind's collection key, so this must run on a Tokio
    /// runtime.
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        let queue = WriteBehind::spawn(E::COLLECTION, Arc::clone(&store));
        Self {
            store,
            queue,
            entities: Vec::new(),
            selected: None,
        }
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    /// Append a freshly constructed entity and return its id.
    ///
    /// Ids and timestamps are stamped by the domain constructor; creation
    /// never fails on valid input.
    pub fn create(&mut self, entity: E) -> E::Id {
        let id = entity.id();
        self.entities.push(entity);
        self.persist();
        id
    }

    /// Merge a patch into the matching entity, refreshing `updated_at`.
    /// Unknown ids are silent no-ops.
    pub fn update(&mut self, id: E::Id, patch: E::Patch) {
        match self.entities.iter_mut().find(|e| e.id() == id) {
            Some(entity) => {
                entity.apply(patch);
                self.persist();
            }
            None => tracing::debug!(kind = E::KIND, %id, "update on unknown id ignored"),
        }
    }

    /// Remove the matching entity, clearing the selection if it pointed at
    /// it. Unknown ids are silent no-ops.
    pub fn delete(&mut self, id: E::Id) {
        let before = self.entities.len();
        self.entities.retain(|e| e.id() != id);
        if self.entities.len() == before {
            tracing::debug!(kind = E::KIND, %id, "delete on unknown id ignored");
            return;
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.persist();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Record the selected id, or clear the selection with `None`.
    ///
    /// Deliberately tolerant: an id no entity carries yet is recorded anyway,
    /// so a selection made before `load` completes resolves itself once the
    /// data arrives. Selection is not a mutation of the collection and is
    /// not persisted.
    pub fn select(&mut self, id: Option<E::Id>) {
        self.selected = id;
    }

    pub fn selected_id(&self) -> Option<E::Id> {
        self.selected
    }

    /// The selected entity, recomputed by lookup on every call. `None` when
    /// nothing is selected or the selected id matches no entity.
    pub fn selected(&self) -> Option<&E> {
        self.selected.and_then(|id| self.get(id))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn get(&self, id: E::Id) -> Option<&E> {
        self.entities.iter().find(|e| e.id() == id)
    }

    /// All entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Replace the collection from storage.
    ///
    /// A missing document or malformed payload degrades to an empty
    /// collection; the caller never sees an error. The recorded selected id
    /// is kept and resolves against whatever loaded.
    pub async fn load(&mut self) {
        self.entities = match self.store.load(E::COLLECTION).await {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(entities) => entities,
                Err(e) => {
                    tracing::warn!(kind = E::KIND, error = %e, "malformed collection document, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(kind = E::KIND, error = %e, "failed to load collection, starting empty");
                Vec::new()
            }
        };
    }

    /// Drain pending snapshots and stop the drainer.
    pub async fn close(&mut self) {
        self.queue.close().await;
    }

    fn persist(&self) {
        match serde_json::to_string(&self.entities) {
            Ok(payload) => self.queue.enqueue(payload),
            Err(e) => tracing::error!(kind = E::KIND, error = %e, "failed to serialize collection snapshot"),
        }
    }
}
