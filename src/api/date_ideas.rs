use crate::api::AppState;
use crate::api::middleware::AuthUser;
use crate::api::schemas::date_ideas::{CreateDateIdeaRequest, DateIdea, InterestResponse};
use crate::error::{AppError, Result};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

/// Lists the marketplace feed, newest first, with the viewer's own interest
/// state folded in.
pub async fn list_date_ideas(auth_user: AuthUser, State(state): State<AppState>) -> Result<impl IntoResponse> {
    let feed = state.date_idea_service.list(auth_user.user_id).await?;
    let ideas: Vec<DateIdea> = feed.into_iter().map(DateIdea::from).collect();

    Ok(Json(ideas))
}

/// Publishes a new date idea authored by the caller.
///
/// # Errors
/// Returns `AppError::BadRequest` when the title or description is missing.
pub async fn create_date_idea(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateDateIdeaRequest>,
) -> Result<impl IntoResponse> {
    payload.validate().map_err(AppError::BadRequest)?;

    let idea = state.date_idea_service.create(auth_user.user_id, payload.into()).await?;

    Ok((StatusCode::CREATED, Json(DateIdea::from(idea))))
}

/// Registers the caller's interest in a date idea. The first expression also
/// creates a date-type match with the author.
///
/// # Errors
/// Returns `AppError::BadRequest` for the author's own idea and
/// `AppError::NotFound` for an unknown idea.
pub async fn express_interest(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(date_idea_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let outcome = state.date_idea_service.express_interest(auth_user.user_id, date_idea_id).await?;

    Ok(Json(InterestResponse::from(outcome)))
}
