use crate::domain::date_idea::DateIdea;
use time::OffsetDateTime;
use uuid::Uuid;

/// Row shape for the marketplace queries: the `date_ideas` row joined with
/// the author's display fields plus the viewer-dependent interest columns.
#[derive(sqlx::FromRow)]
pub(crate) struct DateIdeaRecord {
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

impl From<DateIdeaRecord> for DateIdea {
    fn from(record: DateIdeaRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            category: record.category,
            author_id: record.author_id,
            author_name: record.author_name,
            author_image: record.author_image,
            location: record.location,
            out_of_town: record.out_of_town,
            scheduled_for: record.scheduled_for,
            budget: record.budget,
            dress_code: record.dress_code,
            interest_count: record.interest_count,
            has_interested: record.has_interested,
            created_at: record.created_at,
        }
    }
}
