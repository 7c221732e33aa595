use crate::domain::premium::PremiumGrant;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub(crate) struct PremiumRecord {
    pub user_id: Uuid,
    pub is_premium: bool,
    pub expires_at: Option<OffsetDateTime>,
    pub updated_at: Option<OffsetDateTime>,
}

impl From<PremiumRecord> for PremiumGrant {
    fn from(record: PremiumRecord) -> Self {
        Self {
            user_id: record.user_id,
            is_premium: record.is_premium,
            expires_at: record.expires_at,
            updated_at: record.updated_at,
        }
    }
}
