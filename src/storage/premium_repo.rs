use crate::domain::premium::PremiumGrant;
use crate::error::{AppError, Result};
use crate::storage::records::PremiumRecord;
use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Debug, Default)]
pub struct PremiumRepository {}

impl PremiumRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn find(&self, conn: &mut PgConnection, user_id: Uuid) -> Result<Option<PremiumGrant>> {
        let record = sqlx::query_as::<_, PremiumRecord>(
            "SELECT user_id, is_premium, expires_at, updated_at FROM user_premium WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(conn)
        .await?;

        Ok(record.map(Into::into))
    }

    /// Grants (or refreshes) the entitlement after a verified payment.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the user does not exist.
    /// Returns `AppError::Database` if the upsert fails.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn upsert_active(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        expires_at: OffsetDateTime,
    ) -> Result<PremiumGrant> {
        let result = sqlx::query_as::<_, PremiumRecord>(
            r"
            INSERT INTO user_premium (user_id, is_premium, expires_at, updated_at)
            VALUES ($1, TRUE, $2, NOW())
            ON CONFLICT (user_id) DO UPDATE
                SET is_premium = TRUE, expires_at = EXCLUDED.expires_at, updated_at = NOW()
            RETURNING user_id, is_premium, expires_at, updated_at
            ",
        )
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(conn)
        .await;

        match result {
            Ok(record) => Ok(record.into()),
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some("23503") => {
                // Foreign key violation: no such user
                Err(AppError::NotFound)
            }
            Err(e) => Err(AppError::Database(e)),
        }
    }

    /// Downgrades every grant whose expiry has passed. Returns how many rows
    /// were flipped.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn expire_lapsed(&self, conn: &mut PgConnection) -> Result<u64> {
        let result = sqlx::query(
            r"
            UPDATE user_premium
            SET is_premium = FALSE, updated_at = NOW()
            WHERE is_premium AND expires_at IS NOT NULL AND expires_at < NOW()
            ",
        )
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }
}
