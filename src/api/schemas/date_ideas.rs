use crate::domain::date_idea::{DateIdea as DomainDateIdea, InterestState, NewDateIdea, UNCATEGORIZED};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Only the title and description are required; everything else defaults to
/// blank and an omitted category lands in [`UNCATEGORIZED`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDateIdeaRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub out_of_town: bool,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub dress_code: String,
}

impl CreateDateIdeaRequest {
    /// Validates the date idea payload.
    ///
    /// # Errors
    /// Returns an error message if the title or description is missing or
    /// exceeds its length bound.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title cannot be empty".into());
        }
        if self.title.len() > 200 {
            return Err("Title is too long (max 200 characters)".into());
        }
        if self.description.trim().is_empty() {
            return Err("Description cannot be empty".into());
        }
        if self.description.len() > 4096 {
            return Err("Description is too long (max 4096 characters)".into());
        }
        Ok(())
    }
}

impl From<CreateDateIdeaRequest> for NewDateIdea {
    fn from(request: CreateDateIdeaRequest) -> Self {
        let category =
            if request.category.trim().is_empty() { UNCATEGORIZED.to_string() } else { request.category };

        Self {
            title: request.title,
            description: request.description,
            category,
            location: request.location,
            out_of_town: request.out_of_town,
            scheduled_for: request.date,
            budget: request.budget,
            dress_code: request.dress_code,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateIdea {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_image: Option<String>,
    pub location: String,
    pub out_of_town: bool,
    pub date: String,
    pub budget: String,
    pub dress_code: String,
    pub interest_count: i64,
    pub has_interested: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl From<DomainDateIdea> for DateIdea {
    fn from(idea: DomainDateIdea) -> Self {
        Self {
            id: idea.id,
            title: idea.title,
            description: idea.description,
            category: idea.category,
            author_id: idea.author_id,
            author_name: idea.author_name,
            author_image: idea.author_image,
            location: idea.location,
            out_of_town: idea.out_of_town,
            date: idea.scheduled_for,
            budget: idea.budget,
            dress_code: idea.dress_code,
            interest_count: idea.interest_count,
            has_interested: idea.has_interested,
            created_at: idea.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestResponse {
    pub has_interested: bool,
    pub interest_count: i64,
}

impl From<InterestState> for InterestResponse {
    fn from(state: InterestState) -> Self {
        Self { has_interested: state.has_interested, interest_count: state.interest_count }
    }
}
