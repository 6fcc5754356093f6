use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "msg1",
        "conversation_id": "conv1",
        "sender_id": "6",
        "content": "Hey Jane, do you have a minute to chat?",
        "timestamp": "2024-08-01T09:00:00Z"
    })
)]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub content: String,
    #[schema(format = "date-time", value_type = String)]
    pub timestamp: DateTime<Utc>,
}

/// `last_message` is a denormalized copy of the newest message and must be
/// refreshed in the same critical section as the append that created it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Conversation {
    pub id: String,
    /// Exactly two participants; at most one conversation exists per
    /// unordered pair.
    pub participant_ids: [String; 2],
    pub last_message: Message,
}

impl Conversation {
    pub fn involves(&self, employee_id: &str) -> bool {
        self.participant_ids.iter().any(|id| id == employee_id)
    }

    /// The participant who is not `employee_id`, if they are part of this
    /// conversation at all.
    pub fn peer_of(&self, employee_id: &str) -> Option<&str> {
        if !self.involves(employee_id) {
            return None;
        }
        self.participant_ids
            .iter()
            .map(String::as_str)
            .find(|id| *id != employee_id)
    }
}
