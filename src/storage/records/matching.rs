use crate::domain::matching::{Match, MatchKind};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub(crate) struct MatchRecord {
    pub id: Uuid,
    pub user_a: Uuid,
    pub user_b: Uuid,
    pub interest_type: String,
    pub date_idea_id: Option<Uuid>,
    pub date_author_id: Option<Uuid>,
    pub interest_expires_at: Option<OffsetDateTime>,
    pub created_at: Option<OffsetDateTime>,
}

impl From<MatchRecord> for Match {
    fn from(record: MatchRecord) -> Self {
        // interest_type is constrained to 'swipe' | 'date' by a CHECK.
        let kind = MatchKind::parse(&record.interest_type).unwrap_or(MatchKind::Swipe);
        Self {
            id: record.id,
            user_a: record.user_a,
            user_b: record.user_b,
            kind,
            date_idea_id: record.date_idea_id,
            date_author_id: record.date_author_id,
            interest_expires_at: record.interest_expires_at,
            created_at: record.created_at,
        }
    }
}
