use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Server-side state of an authenticated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Create a record for a session opened now
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            created_at: Utc::now(),
        }
    }
}
