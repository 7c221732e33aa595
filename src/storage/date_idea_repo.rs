use crate::domain::date_idea::{DateIdea, NewDateIdea};
use crate::error::Result;
use crate::storage::records::DateIdeaRecord;
use sqlx::PgConnection;
use uuid::Uuid;

/// Marketplace projection: the idea row joined with the author's display
/// fields plus the viewer-dependent interest columns. `$1` is the viewer.
const IDEA_SELECT: &str = r"
    SELECT d.id, d.title, d.description, d.category, d.author_id,
           u.name AS author_name, u.images[1] AS author_image,
           d.location, d.out_of_town, d.scheduled_for, d.budget, d.dress_code,
           (SELECT COUNT(*) FROM date_interests i WHERE i.date_idea_id = d.id) AS interest_count,
           EXISTS(
               SELECT 1 FROM date_interests i WHERE i.date_idea_id = d.id AND i.user_id = $1
           ) AS has_interested,
           d.created_at
    FROM date_ideas d
    JOIN users u ON u.id = d.author_id
";

#[derive(Clone, Debug, Default)]
pub struct DateIdeaRepository {}

impl DateIdeaRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    #[tracing::instrument(level = "debug", skip(self, conn, idea))]
    pub(crate) async fn create(
        &self,
        conn: &mut PgConnection,
        author_id: Uuid,
        idea: &NewDateIdea,
    ) -> Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r"
            INSERT INTO date_ideas
                (author_id, title, description, category, location, out_of_town, scheduled_for, budget, dress_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            ",
        )
        .bind(author_id)
        .bind(&idea.title)
        .bind(&idea.description)
        .bind(&idea.category)
        .bind(&idea.location)
        .bind(idea.out_of_town)
        .bind(&idea.scheduled_for)
        .bind(&idea.budget)
        .bind(&idea.dress_code)
        .fetch_one(conn)
        .await?;

        Ok(id)
    }

    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn find_for_viewer(
        &self,
        conn: &mut PgConnection,
        date_idea_id: Uuid,
        viewer_id: Uuid,
    ) -> Result<Option<DateIdea>> {
        let record = sqlx::query_as::<_, DateIdeaRecord>(&format!("{IDEA_SELECT} WHERE d.id = $2"))
            .bind(viewer_id)
            .bind(date_idea_id)
            .fetch_optional(conn)
            .await?;

        Ok(record.map(Into::into))
    }

    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn list_for_viewer(&self, conn: &mut PgConnection, viewer_id: Uuid) -> Result<Vec<DateIdea>> {
        let records =
            sqlx::query_as::<_, DateIdeaRecord>(&format!("{IDEA_SELECT} ORDER BY d.created_at DESC, d.id DESC"))
                .bind(viewer_id)
                .fetch_all(conn)
                .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn find_author(&self, conn: &mut PgConnection, date_idea_id: Uuid) -> Result<Option<Uuid>> {
        let author = sqlx::query_scalar::<_, Uuid>("SELECT author_id FROM date_ideas WHERE id = $1")
            .bind(date_idea_id)
            .fetch_optional(conn)
            .await?;

        Ok(author)
    }

    /// Records that a member is interested in an idea. The primary key makes
    /// this exactly-once; returns whether this call was the first expression.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn insert_interest(
        &self,
        conn: &mut PgConnection,
        date_idea_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO date_interests (date_idea_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (date_idea_id, user_id) DO NOTHING
            ",
        )
        .bind(date_idea_id)
        .bind(user_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn interest_count(&self, conn: &mut PgConnection, date_idea_id: Uuid) -> Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM date_interests WHERE date_idea_id = $1")
                .bind(date_idea_id)
                .fetch_one(conn)
                .await?;

        Ok(count)
    }
}
