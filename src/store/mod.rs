pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Event, EventPatch, NewEvent};

pub use postgres::PgEventStore;

#[derive(Debug, Error)]
pub enum StoreError {
    // Collapsed into the same client response as any other store failure;
    // kept as its own case so the server-side log can tell them apart.
    #[error("no event matches the requested id")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// The four logical operations against the `event` table, plus lookup by id.
///
/// Implementations hold their own connection handle; one instance is built
/// at startup and shared through `AppState`.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// All events, ascending by `created_at`. Empty vec when none exist.
    async fn list(&self) -> Result<Vec<Event>, StoreError>;

    /// Single event by id. A missing row and a failed query both surface
    /// as `StoreError`.
    async fn get(&self, id: &str) -> Result<Event, StoreError>;

    /// Insert a new event. The created row is not returned; id and
    /// created_at are assigned by the store.
    async fn create(&self, new: NewEvent) -> Result<(), StoreError>;

    /// Apply the present fields of `patch` to the row matching `id`.
    /// Matching zero rows is a successful no-op, as is an empty patch.
    async fn update(&self, id: &str, patch: EventPatch) -> Result<(), StoreError>;

    /// Delete the row matching `id`. Matching zero rows is a successful
    /// no-op.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
