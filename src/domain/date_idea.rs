use time::OffsetDateTime;
use uuid::Uuid;

/// Categories a date idea may carry. The assist endpoint normalizes free-form
/// text onto this list, falling back to [`UNCATEGORIZED`].
pub const CATEGORIES: &[&str] =
    &["Romantic", "Adventurous", "Foodie", "Outdoors", "Cultural", "Active", "Cozy", "Nightlife"];

pub const UNCATEGORIZED: &str = "Uncategorized";

/// A date idea as shown in the marketplace feed: the stored row joined with
/// its author and the viewer-dependent interest fields. `interest_count` and
/// `has_interested` are always computed from the interest rows, never stored.
#[derive(Debug, Clone)]
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
    pub scheduled_for: String,
    pub budget: String,
    pub dress_code: String,
    pub interest_count: i64,
    pub has_interested: bool,
    pub created_at: Option<OffsetDateTime>,
}

/// Fields a member supplies when posting a new date idea.
#[derive(Debug, Clone)]
pub struct NewDateIdea {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub out_of_town: bool,
    pub scheduled_for: String,
    pub budget: String,
    pub dress_code: String,
}

/// Outcome of expressing interest in a date idea, echoed back to the caller.
#[derive(Debug, Clone, Copy)]
pub struct InterestState {
    pub has_interested: bool,
    pub interest_count: i64,
}
