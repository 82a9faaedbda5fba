//! Combat store - the persistence-backed wrapper around [`CombatSession`].
//!
//! All turn-order invariants live in the domain session; this store queues a
//! snapshot after every successful mutation so an in-progress fight survives
//! an app restart, and restores it on `load`.

use std::sync::Arc;

use dmscreen_domain::{CombatSession, Combatant, CombatantId, Condition, DomainError};

use crate::infrastructure::{CollectionStore, WriteBehind};

/// Collection key the session document persists under.
const COLLECTION: &str = "combat";

/// One active combat's turn order and per-round state.
pub struct CombatStore {
    store: Arc<dyn CollectionStore>,
    queue: WriteBehind,
    session: CombatSession,
}

impl CombatStore {
    /// Create an idle store over `store`. Must run on a Tokio runtime.
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        let queue = WriteBehind::spawn(COLLECTION, Arc::clone(&store));
        Self {
            store,
            queue,
            session: CombatSession::new(),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn session(&self) -> &CombatSession {
        &self.session
    }

    pub fn is_in_combat(&self) -> bool {
        self.session.is_in_combat()
    }

    pub fn round(&self) -> u32 {
        self.session.round()
    }

    /// The roster in turn order.
    pub fn roster(&self) -> &[Combatant] {
        self.session.combatants()
    }

    pub fn active_combatant(&self) -> Option<&Combatant> {
        self.session.active_combatant()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Begin a fight with the given roster.
    pub fn start_combat(&mut self, combatants: Vec<Combatant>) -> Result<(), DomainError> {
        self.session.start(combatants)?;
        self.persist();
        Ok(())
    }

    /// Hand the turn to the next combatant.
    pub fn advance_turn(&mut self) -> Result<(), DomainError> {
        self.session.advance_turn()?;
        self.persist();
        Ok(())
    }

    /// Deal damage, clamping hit points at zero.
    pub fn apply_damage(&mut self, id: CombatantId, amount: i32) -> Result<(), DomainError> {
        self.session.apply_damage(id, amount)?;
        self.persist();
        Ok(())
    }

    /// Heal, clamping hit points at the combatant's maximum.
    pub fn apply_healing(&mut self, id: CombatantId, amount: i32) -> Result<(), DomainError> {
        self.session.apply_healing(id, amount)?;
        self.persist();
        Ok(())
    }

    /// Toggle a condition tag (set semantics).
    pub fn toggle_condition(
        &mut self,
        id: CombatantId,
        condition: Condition,
    ) -> Result<(), DomainError> {
        self.session.toggle_condition(id, condition)?;
        self.persist();
        Ok(())
    }

    /// End the fight and return to idle.
    pub fn end_combat(&mut self) -> Result<(), DomainError> {
        self.session.end()?;
        self.persist();
        Ok(())
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Restore a persisted session, if any.
    ///
    /// A missing or malformed document degrades to an idle session.
    pub async fn load(&mut self) {
        self.session = match self.store.load(COLLECTION).await {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!(error = %e, "malformed combat document, starting idle");
                    CombatSession::new()
                }
            },
            Ok(None) => CombatSession::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load combat session, starting idle");
                CombatSession::new()
            }
        };
    }

    /// Drain pending snapshots and stop the drainer.
    pub async fn close(&mut self) {
        self.queue.close().await;
    }

    fn persist(&self) {
        match serde_json::to_string(&self.session) {
            Ok(payload) => self.queue.enqueue(payload),
            Err(e) => tracing::error!(error = %e, "failed to serialize combat session"),
        }
    }
}
