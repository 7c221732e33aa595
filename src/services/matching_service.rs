use crate::domain::matching::{MatchDetails, MatchPair};
use crate::domain::message::Message;
use crate::domain::swipe::SwipeAction;
use crate::error::{AppError, Result};
use crate::storage::DbPool;
use crate::storage::match_repo::MatchRepository;
use crate::storage::message_repo::MessageRepository;
use crate::storage::swipe_repo::SwipeRepository;
use crate::storage::user_repo::UserRepository;
use opentelemetry::{KeyValue, global, metrics::Counter};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Clone, Debug)]
struct Metrics {
    swipes_total: Counter<u64>,
    matches_created_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("tryst-server");
        Self {
            swipes_total: meter
                .u64_counter("swipes_total")
                .with_description("Total number of swipes recorded, by action")
                .build(),
            matches_created_total: meter
                .u64_counter("matches_created_total")
                .with_description("Total number of matches created, by kind")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MatchingService {
    pool: DbPool,
    user_repo: UserRepository,
    swipe_repo: SwipeRepository,
    match_repo: MatchRepository,
    message_repo: MessageRepository,
    metrics: Metrics,
}

impl MatchingService {
    pub fn new(
        pool: DbPool,
        user_repo: UserRepository,
        swipe_repo: SwipeRepository,
        match_repo: MatchRepository,
        message_repo: MessageRepository,
    ) -> Self {
        Self { pool, user_repo, swipe_repo, match_repo, message_repo, metrics: Metrics::new() }
    }

    /// Records a swipe and resolves it against the reverse edge in one
    /// transaction. Returns whether the pair is now matched.
    ///
    /// Both participant rows are locked in canonical order first, so the two
    /// directions of the same pair serialize: when both like each other
    /// concurrently, the later transaction observes the earlier edge and
    /// exactly one match row comes out of it.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn swipe(&self, actor_id: Uuid, target_id: Uuid, action: SwipeAction) -> Result<bool> {
        if actor_id == target_id {
            return Err(AppError::BadRequest("You cannot swipe on yourself".to_string()));
        }
        let pair = MatchPair::new(actor_id, target_id)?;

        let mut tx = self.pool.begin().await?;

        for user_id in [pair.user_a(), pair.user_b()] {
            if !self.user_repo.lock(&mut tx, user_id).await? {
                return Err(AppError::NotFound);
            }
        }

        let recorded = self.swipe_repo.record(&mut tx, actor_id, target_id, action).await?;

        // A repeated swipe keeps its original action, so the stored edge is
        // what counts, not what this request asked for.
        let forward_like = if recorded {
            action == SwipeAction::Like
        } else {
            self.swipe_repo.like_exists(&mut tx, actor_id, target_id).await?
        };
        let matched = forward_like && self.swipe_repo.like_exists(&mut tx, target_id, actor_id).await?;

        if matched && self.match_repo.insert_swipe_match(&mut tx, pair).await? {
            self.metrics.matches_created_total.add(1, &[KeyValue::new("kind", "swipe")]);
            tracing::info!("New mutual match created");
        }

        tx.commit().await?;

        self.metrics.swipes_total.add(1, &[KeyValue::new("action", action.as_str())]);
        Ok(matched)
    }

    /// Every match the user participates in, newest first, each joined with
    /// the other member's profile and the message thread.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn list_matches(&self, user_id: Uuid) -> Result<Vec<MatchDetails>> {
        let mut conn = self.pool.acquire().await?;

        let matches = self.match_repo.list_for_user(&mut conn, user_id).await?;
        if matches.is_empty() {
            return Ok(Vec::new());
        }

        let other_ids: Vec<Uuid> =
            matches.iter().filter_map(|m| m.other_participant(user_id)).collect();
        let match_ids: Vec<Uuid> = matches.iter().map(|m| m.id).collect();

        let mut profiles: HashMap<Uuid, _> = self
            .user_repo
            .find_profiles(&mut conn, &other_ids)
            .await?
            .into_iter()
            .map(|profile| (profile.id, profile))
            .collect();

        let mut threads: HashMap<Uuid, Vec<Message>> = HashMap::new();
        for message in self.message_repo.list_for_matches(&mut conn, &match_ids).await? {
            threads.entry(message.match_id).or_default().push(message);
        }

        let mut details = Vec::with_capacity(matches.len());
        for m in matches {
            let Some(other_id) = m.other_participant(user_id) else {
                continue;
            };
            let Some(other) = profiles.remove(&other_id) else {
                continue;
            };
            details.push(MatchDetails {
                id: m.id,
                kind: m.kind,
                other,
                messages: threads.remove(&m.id).unwrap_or_default(),
                date_idea_id: m.date_idea_id,
                date_author_id: m.date_author_id,
                interest_expires_at: m.interest_expires_at,
                created_at: m.created_at,
            });
        }

        Ok(details)
    }

    /// Unmatches. Either participant may do this; the thread goes with the
    /// match.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn remove_match(&self, user_id: Uuid, match_id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let m = self.match_repo.find(&mut tx, match_id).await?.ok_or(AppError::NotFound)?;
        if !m.involves(user_id) {
            return Err(AppError::Forbidden);
        }

        if !self.match_repo.delete(&mut tx, match_id).await? {
            return Err(AppError::NotFound);
        }

        tx.commit().await?;
        tracing::info!("Match removed");
        Ok(())
    }
}
