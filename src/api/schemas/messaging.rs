use crate::domain::message::Message as DomainMessage;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub text: String,
}

impl SendMessageRequest {
    /// Validates the message payload.
    ///
    /// # Errors
    /// Returns an error message if the text is blank or exceeds the length
    /// bound.
    pub fn validate(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err("Message text cannot be empty".into());
        }
        if self.text.len() > 4096 {
            return Err("Message is too long (max 4096 characters)".into());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub match_id: Uuid,
    pub sender_id: Uuid,
    pub text: String,
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl From<DomainMessage> for Message {
    fn from(message: DomainMessage) -> Self {
        Self {
            id: message.id,
            match_id: message.match_id,
            sender_id: message.sender_id,
            text: message.body,
            created_at: message.created_at,
        }
    }
}
