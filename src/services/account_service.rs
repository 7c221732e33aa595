use crate::domain::user::{Profile, ProfileChanges};
use crate::error::{AppError, Result};
use crate::storage::DbPool;
use crate::storage::user_repo::UserRepository;
use opentelemetry::{global, metrics::Counter};
use uuid::Uuid;

#[derive(Clone, Debug)]
struct Metrics {
    profile_updates_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("tryst-server");
        Self {
            profile_updates_total: meter
                .u64_counter("profile_updates_total")
                .with_description("Total number of profile edits applied")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AccountService {
    pool: DbPool,
    user_repo: UserRepository,
    metrics: Metrics,
}

impl AccountService {
    pub fn new(pool: DbPool, user_repo: UserRepository) -> Self {
        Self { pool, user_repo, metrics: Metrics::new() }
    }

    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn get_profile(&self, user_id: Uuid) -> Result<Profile> {
        let mut conn = self.pool.acquire().await?;
        self.user_repo.find_profile(&mut conn, user_id).await?.ok_or(AppError::NotFound)
    }

    /// The swipe feed: everyone the viewer has not acted on yet, newest
    /// accounts first.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn list_candidates(&self, viewer_id: Uuid) -> Result<Vec<Profile>> {
        let mut conn = self.pool.acquire().await?;
        self.user_repo.candidates_for(&mut conn, viewer_id).await
    }

    /// Applies a partial edit to the caller's own profile and returns the
    /// result. An empty edit is a read.
    #[tracing::instrument(skip(self, changes), err(level = "warn"))]
    pub async fn update_profile(&self, user_id: Uuid, changes: ProfileChanges) -> Result<Profile> {
        let mut conn = self.pool.acquire().await?;

        if !changes.is_empty() {
            if !self.user_repo.update_profile(&mut conn, user_id, &changes).await? {
                return Err(AppError::NotFound);
            }
            self.metrics.profile_updates_total.add(1, &[]);
        }

        self.user_repo.find_profile(&mut conn, user_id).await?.ok_or(AppError::NotFound)
    }
}
