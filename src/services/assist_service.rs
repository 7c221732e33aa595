use crate::domain::date_idea::{CATEGORIES, UNCATEGORIZED};
use crate::error::{AppError, Result};
use crate::services::assist::AssistProvider;
use crate::storage::DbPool;
use crate::storage::premium_repo::PremiumRepository;
use opentelemetry::{KeyValue, global, metrics::Counter};
use serde_json::Value;
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

/// One request to the assist endpoint. Prompts are fixed server-side; the
/// client only supplies the blanks.
#[derive(Debug, Clone)]
pub enum AssistAction {
    EnhanceDescription { description: String },
    GenerateDateIdea { keywords: String },
    CategorizeDate { title: String, description: String },
    GenerateIcebreaker { name: Option<String> },
    EnhanceBio { bio: String },
    LocalDateIdeas { location: String },
    LocalEvents { location: String, date: String },
    DateSuggestions(DateCriteria),
}

/// Partial criteria for date suggestions. Empty or placeholder values are
/// left out of the prompt.
#[derive(Debug, Clone, Default)]
pub struct DateCriteria {
    pub title: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub budget: Option<String>,
    pub dress_code: Option<String>,
}

impl AssistAction {
    fn prompt(&self) -> String {
        match self {
            Self::EnhanceDescription { description } => format!(
                "You are a creative and witty dating assistant. Enhance the following date description to make it sound more engaging, romantic, and appealing. Keep it concise (2-3 sentences) and exciting.\nOriginal description: \"{description}\"\nEnhanced description:"
            ),
            Self::GenerateDateIdea { keywords } => format!(
                "Generate a creative date idea based on these keywords: \"{keywords}\". Provide a title, a short description (2 sentences), and a potential location (city or specific place)."
            ),
            Self::CategorizeDate { title, description } => format!(
                "Categorize the following date idea into one of these categories: {}.\nTitle: \"{title}\"\nDescription: \"{description}\"\nCategory:",
                CATEGORIES.join(", ")
            ),
            Self::GenerateIcebreaker { name } => {
                let name = name.as_deref().filter(|n| !n.is_empty()).unwrap_or("Friend");
                format!("Create a short, fun, and charming icebreaker message to send to a new match named {name}.")
            }
            Self::EnhanceBio { bio } => format!(
                "You are a witty and charming profile writer. Enhance the following user bio to make it more engaging and interesting, while keeping the original spirit. Keep it under 50 words.\nOriginal bio: \"{bio}\"\nEnhanced bio:"
            ),
            Self::LocalDateIdeas { location } => {
                format!("List 2 unique and romantic date spots or ideas in {location}.")
            }
            Self::LocalEvents { location, date } => format!(
                "Suggest 2 plausible local events (like concerts, festivals, farmers markets, etc.) happening in {location} on or around {date}. Be creative if no real events are known."
            ),
            Self::DateSuggestions(criteria) => criteria.prompt(),
        }
    }

    /// Whether the provider should be pinned to JSON output.
    const fn wants_json(&self) -> bool {
        matches!(
            self,
            Self::GenerateDateIdea { .. }
                | Self::LocalDateIdeas { .. }
                | Self::LocalEvents { .. }
                | Self::DateSuggestions(_)
        )
    }

    const fn label(&self) -> &'static str {
        match self {
            Self::EnhanceDescription { .. } => "enhance_description",
            Self::GenerateDateIdea { .. } => "generate_date_idea",
            Self::CategorizeDate { .. } => "categorize_date",
            Self::GenerateIcebreaker { .. } => "generate_icebreaker",
            Self::EnhanceBio { .. } => "enhance_bio",
            Self::LocalDateIdeas { .. } => "local_date_ideas",
            Self::LocalEvents { .. } => "local_events",
            Self::DateSuggestions(_) => "date_suggestions",
        }
    }
}

impl DateCriteria {
    fn prompt(&self) -> String {
        let mut parts = vec!["Suggest 2 creative date ideas.".to_string()];

        let present = |value: &Option<String>| {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
        };

        if let Some(title) = present(&self.title) {
            parts.push(format!("Related to the title: \"{title}\"."));
        }
        if let Some(location) = present(&self.location) {
            parts.push(format!("Happening in or near: {location}."));
        }
        if let Some(date) = present(&self.date) {
            parts.push(format!("Scheduled for around: {date}."));
        }
        if let Some(category) = present(&self.category).filter(|c| c != UNCATEGORIZED) {
            parts.push(format!("The category is: {category}."));
        }
        if let Some(budget) = present(&self.budget).filter(|b| b != "Not Set") {
            parts.push(format!("The budget is: {budget}."));
        }
        if let Some(dress_code) = present(&self.dress_code).filter(|d| d != "Not Set") {
            parts.push(format!("The dress code is: {dress_code}."));
        }

        parts.join(" ")
    }
}

/// Maps free-form model output onto the known category list.
fn normalize_category(text: &str) -> String {
    let candidate = text.trim();
    CATEGORIES
        .iter()
        .find(|category| **category == candidate)
        .map_or_else(|| UNCATEGORIZED.to_string(), ToString::to_string)
}

#[derive(Clone, Debug)]
struct Metrics {
    requests_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("tryst-server");
        Self {
            requests_total: meter
                .u64_counter("assist_requests_total")
                .with_description("Total number of assist requests served, by action")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AssistService {
    pool: DbPool,
    premium_repo: PremiumRepository,
    provider: Arc<dyn AssistProvider>,
    metrics: Metrics,
}

impl AssistService {
    pub fn new(pool: DbPool, premium_repo: PremiumRepository, provider: Arc<dyn AssistProvider>) -> Self {
        Self { pool, premium_repo, provider, metrics: Metrics::new() }
    }

    /// Runs one assist action for a premium member. The result is a string
    /// for free-text actions and a parsed document for structured ones.
    #[tracing::instrument(skip(self, action), fields(action = action.label()), err(level = "warn"))]
    pub async fn assist(&self, user_id: Uuid, action: AssistAction) -> Result<Value> {
        self.require_premium(user_id).await?;

        let text = self
            .provider
            .generate(&action.prompt(), action.wants_json())
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        let result = if action.wants_json() {
            serde_json::from_str(&text)
                .map_err(|_| AppError::Upstream("Model returned malformed JSON".to_string()))?
        } else if matches!(action, AssistAction::CategorizeDate { .. }) {
            Value::String(normalize_category(&text))
        } else {
            Value::String(text.trim().to_string())
        };

        self.metrics.requests_total.add(1, &[KeyValue::new("action", action.label())]);
        Ok(result)
    }

    async fn require_premium(&self, user_id: Uuid) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        let grant = self.premium_repo.find(&mut conn, user_id).await?;

        if grant.is_none_or(|g| !g.is_effective_at(OffsetDateTime::now_utc())) {
            tracing::debug!("Assist refused: no effective premium entitlement");
            return Err(AppError::Forbidden);
        }
        Ok(())
    }
}
