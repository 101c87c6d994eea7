use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored contact submission as it appears on the wire.
/// The storage layer keeps its own `row_id` for insertion order;
/// it is never serialized.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub reason: String,
    pub service: String,
    pub created_at: DateTime<Utc>,
}
