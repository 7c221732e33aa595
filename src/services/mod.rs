pub mod account_service;
pub mod assist;
pub mod assist_service;
pub mod auth_service;
pub mod date_idea_service;
pub mod health_service;
pub mod matching_service;
pub mod message_service;
pub mod payments;
pub mod premium_service;
pub mod rate_limit_service;

pub use account_service::AccountService;
pub use assist_service::AssistService;
pub use auth_service::AuthService;
pub use date_idea_service::DateIdeaService;
pub use health_service::HealthService;
pub use matching_service::MatchingService;
pub use message_service::MessageService;
pub use premium_service::PremiumService;
pub use rate_limit_service::RateLimitService;
