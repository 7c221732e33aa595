pub mod date_idea;
pub mod matching;
pub mod message;
pub mod premium;
pub mod user;

pub(crate) use date_idea::DateIdeaRecord;
pub(crate) use matching::MatchRecord;
pub(crate) use message::MessageRecord;
pub(crate) use premium::PremiumRecord;
pub(crate) use user::{ProfileRecord, UserRecord};
