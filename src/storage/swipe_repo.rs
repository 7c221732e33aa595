use crate::domain::swipe::SwipeAction;
use crate::error::Result;
use sqlx::PgConnection;
use uuid::Uuid;

#[derive(Clone, Debug, Default)]
pub struct SwipeRepository {}

impl SwipeRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Records a directed swipe edge. Idempotent: the first action for a pair
    /// wins and repeats are a no-op. Returns whether a new edge was written.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn record(
        &self,
        conn: &mut PgConnection,
        swiper_id: Uuid,
        swiped_id: Uuid,
        action: SwipeAction,
    ) -> Result<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO swipes (swiper_id, swiped_id, action)
            VALUES ($1, $2, $3)
            ON CONFLICT (swiper_id, swiped_id) DO NOTHING
            ",
        )
        .bind(swiper_id)
        .bind(swiped_id)
        .bind(action.as_str())
        .execute(conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Whether `swiper_id` has already liked `swiped_id`.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn like_exists(
        &self,
        conn: &mut PgConnection,
        swiper_id: Uuid,
        swiped_id: Uuid,
    ) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM swipes WHERE swiper_id = $1 AND swiped_id = $2 AND action = 'like')",
        )
        .bind(swiper_id)
        .bind(swiped_id)
        .fetch_one(conn)
        .await?;

        Ok(exists)
    }
}
