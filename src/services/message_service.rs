use crate::domain::matching::MatchKind;
use crate::domain::message::Message;
use crate::error::{AppError, Result};
use crate::storage::DbPool;
use crate::storage::match_repo::MatchRepository;
use crate::storage::message_repo::MessageRepository;
use opentelemetry::{global, metrics::Counter};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Debug)]
struct Metrics {
    messages_sent_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("tryst-server");
        Self {
            messages_sent_total: meter
                .u64_counter("messages_sent_total")
                .with_description("Total number of messages delivered to match threads")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MessageService {
    pool: DbPool,
    match_repo: MatchRepository,
    message_repo: MessageRepository,
    metrics: Metrics,
}

impl MessageService {
    pub fn new(pool: DbPool, match_repo: MatchRepository, message_repo: MessageRepository) -> Self {
        Self { pool, match_repo, message_repo, metrics: Metrics::new() }
    }

    /// Appends a message to a match the sender participates in.
    ///
    /// Side effect, decided under the match row lock: a message on a
    /// date-type match whose reply window has passed clears the window, from
    /// either participant. A cleared window never comes back.
    #[tracing::instrument(skip(self, body), err(level = "warn"))]
    pub async fn send(&self, sender_id: Uuid, match_id: Uuid, body: String) -> Result<Message> {
        let mut tx = self.pool.begin().await?;

        let m = self.match_repo.find_for_update(&mut tx, match_id).await?.ok_or(AppError::NotFound)?;
        if !m.involves(sender_id) {
            return Err(AppError::Forbidden);
        }

        let message = self.message_repo.append(&mut tx, match_id, sender_id, &body).await?;

        if m.kind == MatchKind::Date && m.is_expired_at(OffsetDateTime::now_utc()) {
            self.match_repo.clear_expiry(&mut tx, match_id).await?;
            tracing::info!("Reply window cleared for date match");
        }

        tx.commit().await?;

        self.metrics.messages_sent_total.add(1, &[]);
        Ok(message)
    }

    /// The full thread in delivery order. Only participants may read it.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn list(&self, caller_id: Uuid, match_id: Uuid) -> Result<Vec<Message>> {
        let mut conn = self.pool.acquire().await?;

        let m = self.match_repo.find(&mut conn, match_id).await?.ok_or(AppError::NotFound)?;
        if !m.involves(caller_id) {
            return Err(AppError::Forbidden);
        }

        self.message_repo.list_for_match(&mut conn, match_id).await
    }
}
