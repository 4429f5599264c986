use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// The date and time columns are plain text: the UI submits them as strings
// and nothing on the server interprets them.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a new event. The id and created_at are assigned
/// by the database.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub date: String,
    pub time: String,
}

/// Partial update for an event. Absent fields are left untouched; unknown
/// fields in the request body are ignored, so `{}` is a valid empty patch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.time.is_none()
    }
}
