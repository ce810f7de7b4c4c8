use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored guestbook entry as the backend returns it. The id and timestamp
/// are assigned server-side; the client never rewrites either.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Message {
    pub id: i64,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}
