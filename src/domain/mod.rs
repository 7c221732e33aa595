pub mod auth;
pub mod date_idea;
pub mod matching;
pub mod message;
pub mod premium;
pub mod swipe;
pub mod user;
