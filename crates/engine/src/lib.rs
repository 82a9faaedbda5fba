//! DM Screen Engine library.
//!
//! Everything the UI layer calls lives here:
//!
//! - `infrastructure/` - storage ports, JSON-file adapters, the write-behind
//!   persistence queue
//! - `repositories/` - generic entity CRUD plus single-selection tracking
//! - `stores/` - combat session and settings stores
//! - `app` - application composition (the explicit context object)
//!
//! Mutations take effect on in-memory state synchronously; persistence is
//! write-behind and never blocks or fails a mutation.

pub mod app;
pub mod infrastructure;
pub mod repositories;
pub mod stores;

/// In-memory fakes for unit tests.
#[cfg(test)]
pub mod test_fixtures;


pub use app::{App, AppConfig};
