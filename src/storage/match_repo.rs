use crate::domain::matching::{Match, MatchPair};
use crate::error::Result;
use crate::storage::records::MatchRecord;
use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

const MATCH_COLUMNS: &str =
    "id, user_a, user_b, interest_type, date_idea_id, date_author_id, interest_expires_at, created_at";

#[derive(Clone, Debug, Default)]
pub struct MatchRepository {}

impl MatchRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Creates the swipe match for a pair, reusing an existing one. The
    /// partial unique index on `(user_a, user_b)` makes this a no-op when the
    /// pair is already matched. Returns whether a new row was written.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn insert_swipe_match(&self, conn: &mut PgConnection, pair: MatchPair) -> Result<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO matches (user_a, user_b, interest_type)
            VALUES ($1, $2, 'swipe')
            ON CONFLICT (user_a, user_b) WHERE interest_type = 'swipe' DO NOTHING
            ",
        )
        .bind(pair.user_a())
        .bind(pair.user_b())
        .execute(conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Creates the one-sided date match between an interested member and the
    /// idea's author, with the reply window already stamped.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn insert_date_match(
        &self,
        conn: &mut PgConnection,
        pair: MatchPair,
        date_idea_id: Uuid,
        date_author_id: Uuid,
        interest_expires_at: OffsetDateTime,
    ) -> Result<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO matches (user_a, user_b, interest_type, date_idea_id, date_author_id, interest_expires_at)
            VALUES ($1, $2, 'date', $3, $4, $5)
            ON CONFLICT (date_idea_id, user_a, user_b) WHERE interest_type = 'date' DO NOTHING
            ",
        )
        .bind(pair.user_a())
        .bind(pair.user_b())
        .bind(date_idea_id)
        .bind(date_author_id)
        .bind(interest_expires_at)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn find(&self, conn: &mut PgConnection, match_id: Uuid) -> Result<Option<Match>> {
        let record =
            sqlx::query_as::<_, MatchRecord>(&format!("SELECT {MATCH_COLUMNS} FROM matches WHERE id = $1"))
                .bind(match_id)
                .fetch_optional(conn)
                .await?;

        Ok(record.map(Into::into))
    }

    /// Like `find`, but locks the row so the expiry side effect of a message
    /// append is evaluated against a stable view.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn find_for_update(&self, conn: &mut PgConnection, match_id: Uuid) -> Result<Option<Match>> {
        let record = sqlx::query_as::<_, MatchRecord>(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches WHERE id = $1 FOR UPDATE"
        ))
        .bind(match_id)
        .fetch_optional(conn)
        .await?;

        Ok(record.map(Into::into))
    }

    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn list_for_user(&self, conn: &mut PgConnection, user_id: Uuid) -> Result<Vec<Match>> {
        let records = sqlx::query_as::<_, MatchRecord>(&format!(
            r"
            SELECT {MATCH_COLUMNS} FROM matches
            WHERE user_a = $1 OR user_b = $1
            ORDER BY created_at DESC, id DESC
            ",
        ))
        .bind(user_id)
        .fetch_all(conn)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Clears the reply window. Once cleared it never comes back.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn clear_expiry(&self, conn: &mut PgConnection, match_id: Uuid) -> Result<()> {
        sqlx::query("UPDATE matches SET interest_expires_at = NULL WHERE id = $1")
            .bind(match_id)
            .execute(conn)
            .await?;

        Ok(())
    }

    /// Deletes a match; messages go with it via the cascade.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn delete(&self, conn: &mut PgConnection, match_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM matches WHERE id = $1").bind(match_id).execute(conn).await?;

        Ok(result.rows_affected() == 1)
    }
}
