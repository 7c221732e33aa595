pub mod assist;
pub mod auth;
pub mod date_ideas;
pub mod health;
pub mod matching;
pub mod messaging;
pub mod premium;
pub mod swipes;
pub mod users;
