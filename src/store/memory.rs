//! In-memory `EventStore` used by the handler tests. Mirrors the Postgres
//! semantics: ascending `created_at` listing, no-op update/delete on an
//! unknown id, `NotFound` from `get`.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use crate::models::{Event, EventPatch, NewEvent};
use crate::store::{EventStore, StoreError};

pub struct MemoryEventStore {
    events: Mutex<Vec<Event>>,
    ticks: AtomicI64,
    failing: AtomicBool,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            ticks: AtomicI64::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every subsequent operation fail, to exercise the 500 paths.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Insert a fully-formed row, bypassing create. Lets tests control
    /// `created_at` directly.
    pub fn seed(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn list(&self) -> Result<Vec<Event>, StoreError> {
        self.check()?;
        let mut events = self.events.lock().unwrap().clone();
        events.sort_by_key(|e| e.created_at);
        Ok(events)
    }

    async fn get(&self, id: &str) -> Result<Event, StoreError> {
        self.check()?;
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id.to_string() == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, new: NewEvent) -> Result<(), StoreError> {
        self.check()?;
        // Monotonic timestamps so insertion order is the listing order.
        let seq = self.ticks.fetch_add(1, Ordering::SeqCst);
        let created_at = Utc.timestamp_opt(1_700_000_000 + seq, 0).unwrap();
        self.events.lock().unwrap().push(Event {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            date: new.date,
            time: new.time,
            created_at,
        });
        Ok(())
    }

    async fn update(&self, id: &str, patch: EventPatch) -> Result<(), StoreError> {
        self.check()?;
        let mut events = self.events.lock().unwrap();
        if let Some(event) = events.iter_mut().find(|e| e.id.to_string() == id) {
            if let Some(name) = patch.name {
                event.name = name;
            }
            if let Some(description) = patch.description {
                event.description = description;
            }
            if let Some(date) = patch.date {
                event.date = date;
            }
            if let Some(time) = patch.time {
                event.time = time;
            }
        }
        // Unknown id: no-op success, same as the Postgres store.
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.check()?;
        self.events
            .lock()
            .unwrap()
            .retain(|e| e.id.to_string() != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, secs: i64) -> Event {
        Event {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: "d".to_string(),
            date: "2024-05-01".to_string(),
            time: "09:00".to_string(),
            created_at: Utc.timestamp_opt(secs, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn list_orders_by_created_at_regardless_of_insert_order() {
        let store = MemoryEventStore::new();
        store.seed(event("second", 200));
        store.seed(event("first", 100));
        store.seed(event("third", 300));

        let events = store.list().await.unwrap();
        let names: Vec<_> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn update_applies_only_present_fields() {
        let store = MemoryEventStore::new();
        let seeded = event("original", 100);
        let id = seeded.id.to_string();
        store.seed(seeded);

        let patch = EventPatch {
            name: Some("renamed".to_string()),
            ..Default::default()
        };
        store.update(&id, patch).await.unwrap();

        let fetched = store.get(&id).await.unwrap();
        assert_eq!(fetched.name, "renamed");
        assert_eq!(fetched.description, "d");
        assert_eq!(fetched.time, "09:00");
    }

    #[tokio::test]
    async fn update_and_delete_on_unknown_id_are_no_ops() {
        let store = MemoryEventStore::new();
        store.seed(event("keep", 100));

        let missing = Uuid::new_v4().to_string();
        store
            .update(&missing, EventPatch::default())
            .await
            .unwrap();
        store.delete(&missing).await.unwrap();

        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn get_on_missing_id_is_not_found() {
        let store = MemoryEventStore::new();
        let err = store.get(&Uuid::new_v4().to_string()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn create_assigns_increasing_created_at() {
        let store = MemoryEventStore::new();
        for name in ["a", "b", "c"] {
            store
                .create(NewEvent {
                    name: name.to_string(),
                    description: "d".to_string(),
                    date: "2024-05-01".to_string(),
                    time: "09:00".to_string(),
                })
                .await
                .unwrap();
        }

        let events = store.list().await.unwrap();
        let names: Vec<_> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(events.windows(2).all(|w| w[0].created_at < w[1].created_at));
    }
}
