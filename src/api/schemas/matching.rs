use crate::api::schemas::messaging::Message;
use crate::api::schemas::users::Profile;
use crate::domain::matching::MatchDetails;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// A match as rendered for one participant: `user` is always the other
/// member, and the interest fields are only set for date-type matches.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: Uuid,
    pub interest_type: &'static str,
    pub user: Profile,
    pub messages: Vec<Message>,
    pub date_idea_id: Option<Uuid>,
    pub date_author_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub interest_expires_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl From<MatchDetails> for Match {
    fn from(details: MatchDetails) -> Self {
        Self {
            id: details.id,
            interest_type: details.kind.as_str(),
            user: details.other.into(),
            messages: details.messages.into_iter().map(Message::from).collect(),
            date_idea_id: details.date_idea_id,
            date_author_id: details.date_author_id,
            interest_expires_at: details.interest_expires_at,
            created_at: details.created_at,
        }
    }
}
