use crate::config::AuthConfig;
use crate::domain::auth::{Claims, Password};
use crate::domain::user::Profile;
use crate::error::{AppError, Result};
use crate::storage::user_repo::UserRepository;
use opentelemetry::{global, metrics::Counter};
use uuid::Uuid;

const DEFAULT_AGE: i32 = 18;

#[derive(Clone, Debug)]
struct Metrics {
    signup_total: Counter<u64>,
    login_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("tryst-server");
        Self {
            signup_total: meter
                .u64_counter("auth_signup_total")
                .with_description("Total number of accounts created")
                .build(),
            login_total: meter
                .u64_counter("auth_login_total")
                .with_description("Total number of successful login attempts")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AuthService {
    config: AuthConfig,
    pool: crate::storage::DbPool,
    user_repo: UserRepository,
    metrics: Metrics,
}

impl AuthService {
    pub fn new(config: AuthConfig, pool: crate::storage::DbPool, user_repo: UserRepository) -> Self {
        Self { config, pool, user_repo, metrics: Metrics::new() }
    }

    /// Creates an account with the signup defaults and logs it straight in.
    #[tracing::instrument(
        skip(self, name, email, password),
        fields(user_id = tracing::field::Empty),
        err(level = "warn")
    )]
    pub async fn signup(&self, name: String, email: String, password: String) -> Result<(Profile, String)> {
        let password_hash = self.hash_password(&password).await?;

        // The id seeds the placeholder image, so it has to exist pre-insert.
        let user_id = Uuid::new_v4();
        let images = vec![format!("https://picsum.photos/seed/{user_id}/800/1200")];

        let mut conn = self.pool.acquire().await?;
        let user = self
            .user_repo
            .create(&mut conn, user_id, &name, &email, &password_hash, DEFAULT_AGE, &images)
            .await?;

        tracing::Span::current().record("user_id", tracing::field::display(user.id));

        let profile = self.user_repo.find_profile(&mut conn, user.id).await?.ok_or(AppError::Internal)?;
        let token = self.issue_token(user.id)?;

        self.metrics.signup_total.add(1, &[]);
        Ok((profile, token))
    }

    /// An unknown email and a wrong password are indistinguishable to the
    /// caller; both come back as `AuthError`.
    #[tracing::instrument(
        skip(self, email, password),
        fields(user_id = tracing::field::Empty),
        err(level = "warn")
    )]
    pub async fn login(&self, email: String, password: String) -> Result<(Profile, String)> {
        let mut conn = self.pool.acquire().await?;
        let user = match self.user_repo.find_by_email(&mut conn, &email).await? {
            Some(u) => u,
            None => {
                tracing::warn!("Login failed: user not found");
                return Err(AppError::AuthError);
            }
        };

        tracing::Span::current().record("user_id", tracing::field::display(user.id));

        if !self.verify_password(&password, &user.password_hash).await? {
            tracing::warn!("Login failed: invalid password");
            return Err(AppError::AuthError);
        }

        let profile = self.user_repo.find_profile(&mut conn, user.id).await?.ok_or(AppError::Internal)?;
        let token = self.issue_token(user.id)?;

        self.metrics.login_total.add(1, &[]);
        Ok((profile, token))
    }

    #[tracing::instrument(err, skip(self, password))]
    pub async fn hash_password(&self, password: &str) -> Result<String> {
        let password = password.to_string();
        tokio::task::spawn_blocking(move || Password::hash(&password))
            .await
            .map_err(|_| AppError::Internal)?
    }

    #[tracing::instrument(err, skip(self, password, password_hash))]
    pub async fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool> {
        let password = password.to_string();
        let password_hash = password_hash.to_string();
        tokio::task::spawn_blocking(move || Password::verify(&password, &password_hash))
            .await
            .map_err(|_| AppError::Internal)?
    }

    fn issue_token(&self, user_id: Uuid) -> Result<String> {
        Claims::new(user_id, self.config.access_token_ttl_secs).encode(&self.config.jwt_secret)
    }

    /// Verifies a bearer token and returns the user id (subject).
    pub fn verify_token(&self, token: &str) -> Result<Uuid> {
        Ok(Claims::decode(token, &self.config.jwt_secret)?.sub)
    }
}
