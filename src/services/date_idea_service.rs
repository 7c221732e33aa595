use crate::config::MatchingConfig;
use crate::domain::date_idea::{DateIdea, InterestState, NewDateIdea};
use crate::domain::matching::MatchPair;
use crate::error::{AppError, Result};
use crate::storage::DbPool;
use crate::storage::date_idea_repo::DateIdeaRepository;
use crate::storage::match_repo::MatchRepository;
use opentelemetry::{KeyValue, global, metrics::Counter};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

#[derive(Clone, Debug)]
struct Metrics {
    ideas_created_total: Counter<u64>,
    interests_total: Counter<u64>,
    matches_created_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("tryst-server");
        Self {
            ideas_created_total: meter
                .u64_counter("date_ideas_created_total")
                .with_description("Total number of date ideas posted")
                .build(),
            interests_total: meter
                .u64_counter("date_interests_total")
                .with_description("Total number of first-time interest expressions")
                .build(),
            matches_created_total: meter
                .u64_counter("matches_created_total")
                .with_description("Total number of matches created, by kind")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DateIdeaService {
    config: MatchingConfig,
    pool: DbPool,
    date_idea_repo: DateIdeaRepository,
    match_repo: MatchRepository,
    metrics: Metrics,
}

impl DateIdeaService {
    pub fn new(
        config: MatchingConfig,
        pool: DbPool,
        date_idea_repo: DateIdeaRepository,
        match_repo: MatchRepository,
    ) -> Self {
        Self { config, pool, date_idea_repo, match_repo, metrics: Metrics::new() }
    }

    #[tracing::instrument(skip(self, idea), err(level = "warn"))]
    pub async fn create(&self, author_id: Uuid, idea: NewDateIdea) -> Result<DateIdea> {
        let mut conn = self.pool.acquire().await?;

        let id = self.date_idea_repo.create(&mut conn, author_id, &idea).await?;
        let created = self
            .date_idea_repo
            .find_for_viewer(&mut conn, id, author_id)
            .await?
            .ok_or(AppError::Internal)?;

        self.metrics.ideas_created_total.add(1, &[]);
        tracing::info!(date_idea_id = %id, "Date idea posted");
        Ok(created)
    }

    /// The marketplace feed, newest first, with the viewer's interest state
    /// folded in.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn list(&self, viewer_id: Uuid) -> Result<Vec<DateIdea>> {
        let mut conn = self.pool.acquire().await?;
        self.date_idea_repo.list_for_viewer(&mut conn, viewer_id).await
    }

    /// Marks the user interested in an idea. The first expression creates a
    /// one-sided date match with the idea's author, open for a reply until
    /// the interest window closes. No reciprocity is involved; repeats change
    /// nothing and return the same state.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn express_interest(&self, user_id: Uuid, date_idea_id: Uuid) -> Result<InterestState> {
        let mut tx = self.pool.begin().await?;

        let author_id =
            self.date_idea_repo.find_author(&mut tx, date_idea_id).await?.ok_or(AppError::NotFound)?;
        if author_id == user_id {
            return Err(AppError::BadRequest(
                "You cannot express interest in your own date idea".to_string(),
            ));
        }

        let first_expression = self.date_idea_repo.insert_interest(&mut tx, date_idea_id, user_id).await?;

        if first_expression {
            let pair = MatchPair::new(user_id, author_id)?;
            let expires_at = OffsetDateTime::now_utc() + Duration::days(self.config.interest_window_days);

            if self.match_repo.insert_date_match(&mut tx, pair, date_idea_id, author_id, expires_at).await? {
                self.metrics.matches_created_total.add(1, &[KeyValue::new("kind", "date")]);
                tracing::info!("Date match created from interest");
            }
            self.metrics.interests_total.add(1, &[]);
        }

        let interest_count = self.date_idea_repo.interest_count(&mut tx, date_idea_id).await?;
        tx.commit().await?;

        Ok(InterestState { has_interested: true, interest_count })
    }
}
