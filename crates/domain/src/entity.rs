//! The `Entity` trait - shared contract for persisted record kinds.
//!
//! Ties one record kind (Campaign, PlayerCharacter, Spellbook) to its typed
//! id, its partial-update patch, and the collection key its documents are
//! stored under. The repositories in `dmscreen-engine` are generic over this
//! trait, so all three kinds share one CRUD + selection implementation.

use std::fmt::Display;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

/// A persisted, user-managed record kind.
///
/// Implementors stamp `id`/`created_at`/`updated_at` in their constructors
/// and refresh `updated_at` in every mutator, so a repository never has to
/// reach into entity fields.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Typed id for this kind.
    type Id: Copy + Eq + Hash + Display + Send + Sync + 'static;

    /// Partial update: a struct of `Option` fields, `None` meaning "leave as is".
    type Patch: Send;

    /// Collection key this kind persists under (one JSON document per key).
    const COLLECTION: &'static str;

    /// Human-readable kind name, used in logs.
    const KIND: &'static str;

    fn id(&self) -> Self::Id;

    /// Display label. Not guaranteed unique.
    fn name(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> DateTime<Utc>;

    /// Merge the populated fields of `patch` into `self` and refresh
    /// `updated_at`.
    fn apply(&mut self, patch: Self::Patch);
}
