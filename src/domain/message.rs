use time::OffsetDateTime;
use uuid::Uuid;

/// A chat message inside a match thread. Immutable once stored; thread order
/// is `(created_at, id)` ascending.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: Uuid,
    pub match_id: Uuid,
    pub sender_id: Uuid,
    pub body: String,
    pub created_at: Option<OffsetDateTime>,
}
