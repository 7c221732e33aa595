use crate::services::assist_service::{AssistAction, DateCriteria};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The tagged assist action body. An unknown tag fails deserialization, so
/// unsupported actions are rejected before they reach the service.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum AssistRequest {
    EnhanceDescription {
        description: String,
    },
    GenerateDateIdea {
        keywords: String,
    },
    CategorizeDate {
        title: String,
        description: String,
    },
    GenerateIcebreaker {
        name: Option<String>,
    },
    EnhanceBio {
        bio: String,
    },
    GetLocalDateIdeas {
        location: String,
    },
    GetLocalEvents {
        location: String,
        date: String,
    },
    #[serde(rename_all = "camelCase")]
    GenerateDateSuggestions {
        title: Option<String>,
        location: Option<String>,
        date: Option<String>,
        category: Option<String>,
        budget: Option<String>,
        dress_code: Option<String>,
    },
}

impl AssistRequest {
    #[must_use]
    pub fn into_action(self) -> AssistAction {
        match self {
            Self::EnhanceDescription { description } => AssistAction::EnhanceDescription { description },
            Self::GenerateDateIdea { keywords } => AssistAction::GenerateDateIdea { keywords },
            Self::CategorizeDate { title, description } => AssistAction::CategorizeDate { title, description },
            Self::GenerateIcebreaker { name } => AssistAction::GenerateIcebreaker { name },
            Self::EnhanceBio { bio } => AssistAction::EnhanceBio { bio },
            Self::GetLocalDateIdeas { location } => AssistAction::LocalDateIdeas { location },
            Self::GetLocalEvents { location, date } => AssistAction::LocalEvents { location, date },
            Self::GenerateDateSuggestions { title, location, date, category, budget, dress_code } => {
                AssistAction::DateSuggestions(DateCriteria {
                    title,
                    location,
                    date,
                    category,
                    budget,
                    dress_code,
                })
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AssistResponse {
    pub result: Value,
}
