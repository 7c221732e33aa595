use crate::domain::swipe::SwipeAction;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeRequest {
    pub swiped_user_id: Uuid,
    #[serde(default)]
    pub action: String,
}

impl SwipeRequest {
    /// Parses the requested action.
    ///
    /// # Errors
    /// Returns an error message when the action is not `like` or `pass`.
    pub fn action(&self) -> Result<SwipeAction, String> {
        SwipeAction::parse(&self.action).ok_or_else(|| format!("Unknown swipe action: {:?}", self.action))
    }
}

#[derive(Debug, Serialize)]
pub struct SwipeResponse {
    pub matched: bool,
}
