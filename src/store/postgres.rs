use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::database::Database;
use crate::models::{Event, EventPatch, NewEvent};
use crate::store::{EventStore, StoreError};

/// `EventStore` backed by the Postgres pool.
///
/// Ids arrive as raw path text and are cast to uuid inside the query, so a
/// malformed id fails the same way any other bad query does.
pub struct PgEventStore {
    pool: Pool<Postgres>,
}

impl PgEventStore {
    pub fn new(db: Database) -> Self {
        Self { pool: db.pool }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn list(&self) -> Result<Vec<Event>, StoreError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, name, description, date, time, created_at
             FROM event
             ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn get(&self, id: &str) -> Result<Event, StoreError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, name, description, date, time, created_at
             FROM event
             WHERE id = $1::uuid",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        event.ok_or(StoreError::NotFound)
    }

    async fn create(&self, new: NewEvent) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO event (name, description, date, time)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(new.name)
        .bind(new.description)
        .bind(new.date)
        .bind(new.time)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, id: &str, patch: EventPatch) -> Result<(), StoreError> {
        // Nothing to change; skip the round trip.
        if patch.is_empty() {
            return Ok(());
        }

        let mut sets: Vec<String> = Vec::new();
        let mut bind_idx = 2;
        if patch.name.is_some() {
            sets.push(format!("name = ${}", bind_idx));
            bind_idx += 1;
        }
        if patch.description.is_some() {
            sets.push(format!("description = ${}", bind_idx));
            bind_idx += 1;
        }
        if patch.date.is_some() {
            sets.push(format!("date = ${}", bind_idx));
            bind_idx += 1;
        }
        if patch.time.is_some() {
            sets.push(format!("time = ${}", bind_idx));
        }

        let q = format!("UPDATE event SET {} WHERE id = $1::uuid", sets.join(", "));

        let mut dbq = sqlx::query(&q).bind(id);
        if let Some(name) = patch.name {
            dbq = dbq.bind(name);
        }
        if let Some(description) = patch.description {
            dbq = dbq.bind(description);
        }
        if let Some(date) = patch.date {
            dbq = dbq.bind(date);
        }
        if let Some(time) = patch.time {
            dbq = dbq.bind(time);
        }

        // rows_affected is deliberately not checked: updating an unknown id
        // is a no-op success.
        dbq.execute(&self.pool).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM event WHERE id = $1::uuid")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
