use crate::domain::message::Message;
use crate::error::{AppError, Result};
use crate::storage::records::MessageRecord;
use sqlx::PgConnection;
use uuid::Uuid;

#[derive(Clone, Debug, Default)]
pub struct MessageRepository {}

impl MessageRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Appends a message to a match thread.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the match no longer exists.
    /// Returns `AppError::Database` if the insert fails.
    #[tracing::instrument(level = "debug", skip(self, conn, body))]
    pub(crate) async fn append(
        &self,
        conn: &mut PgConnection,
        match_id: Uuid,
        sender_id: Uuid,
        body: &str,
    ) -> Result<Message> {
        let result = sqlx::query_as::<_, MessageRecord>(
            r"
            INSERT INTO messages (match_id, sender_id, body)
            VALUES ($1, $2, $3)
            RETURNING id, match_id, sender_id, body, created_at
            ",
        )
        .bind(match_id)
        .bind(sender_id)
        .bind(body)
        .fetch_one(conn)
        .await;

        match result {
            Ok(record) => Ok(record.into()),
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some("23503") => {
                // Foreign key violation: the match was removed underneath us
                Err(AppError::NotFound)
            }
            Err(e) => Err(AppError::Database(e)),
        }
    }

    /// The full thread in delivery order.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn list_for_match(&self, conn: &mut PgConnection, match_id: Uuid) -> Result<Vec<Message>> {
        let records = sqlx::query_as::<_, MessageRecord>(
            r"
            SELECT id, match_id, sender_id, body, created_at
            FROM messages
            WHERE match_id = $1
            ORDER BY created_at ASC, id ASC
            ",
        )
        .bind(match_id)
        .fetch_all(conn)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Threads for a set of matches in one round trip, in delivery order.
    #[tracing::instrument(level = "debug", skip(self, conn), fields(count = match_ids.len()))]
    pub(crate) async fn list_for_matches(
        &self,
        conn: &mut PgConnection,
        match_ids: &[Uuid],
    ) -> Result<Vec<Message>> {
        let records = sqlx::query_as::<_, MessageRecord>(
            r"
            SELECT id, match_id, sender_id, body, created_at
            FROM messages
            WHERE match_id = ANY($1)
            ORDER BY created_at ASC, id ASC
            ",
        )
        .bind(match_ids)
        .fetch_all(conn)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }
}
