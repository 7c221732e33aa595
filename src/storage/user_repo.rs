use crate::domain::user::{Profile, ProfileChanges, User};
use crate::error::{AppError, Result};
use crate::storage::records::{ProfileRecord, UserRecord};
use sqlx::{PgConnection, QueryBuilder};
use uuid::Uuid;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, age, bio, images, interests, phone, background, created_at";

/// Profile projection with the effective premium flag computed in SQL, so a
/// lapsed entitlement reads as not premium even before the sweeper runs.
const PROFILE_SELECT: &str = r"
    SELECT u.id, u.name, u.email, u.age, u.bio, u.images, u.interests, u.phone, u.background,
           COALESCE(p.is_premium AND (p.expires_at IS NULL OR p.expires_at > NOW()), FALSE) AS is_premium,
           u.created_at
    FROM users u
    LEFT JOIN user_premium p ON p.user_id = u.id
";

#[derive(Clone, Debug, Default)]
pub struct UserRepository {}

impl UserRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Inserts a new account. The id is assigned by the caller so derived
    /// fields (the placeholder image seed) can reference it.
    ///
    /// # Errors
    /// Returns `AppError::Conflict` if the email is already registered.
    /// Returns `AppError::Database` if the insert fails.
    #[tracing::instrument(level = "debug", skip(self, conn, password_hash))]
    pub(crate) async fn create(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        name: &str,
        email: &str,
        password_hash: &str,
        age: i32,
        images: &[String],
    ) -> Result<User> {
        let result = sqlx::query_as::<_, UserRecord>(&format!(
            r"
            INSERT INTO users (id, name, email, password_hash, age, images)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            ",
        ))
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(age)
        .bind(images)
        .fetch_one(conn)
        .await;

        match result {
            Ok(record) => Ok(record.into()),
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some("23505") => {
                // Unique violation on the email column
                Err(AppError::Conflict("An account with this email already exists".to_string()))
            }
            Err(e) => Err(AppError::Database(e)),
        }
    }

    #[tracing::instrument(level = "debug", skip(self, conn, email))]
    pub(crate) async fn find_by_email(&self, conn: &mut PgConnection, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(conn)
        .await?;

        Ok(user.map(Into::into))
    }

    /// Locks the user row for the rest of the transaction, proving it exists.
    /// Callers lock pair members in canonical (ascending id) order so the two
    /// directions of the same pair serialize instead of deadlocking.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn lock(&self, conn: &mut PgConnection, user_id: Uuid) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(conn)
            .await?;

        Ok(row.is_some())
    }

    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn find_profile(&self, conn: &mut PgConnection, user_id: Uuid) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, ProfileRecord>(&format!("{PROFILE_SELECT} WHERE u.id = $1"))
            .bind(user_id)
            .fetch_optional(conn)
            .await?;

        Ok(profile.map(Into::into))
    }

    #[tracing::instrument(level = "debug", skip(self, conn), fields(count = user_ids.len()))]
    pub(crate) async fn find_profiles(
        &self,
        conn: &mut PgConnection,
        user_ids: &[Uuid],
    ) -> Result<Vec<Profile>> {
        let profiles = sqlx::query_as::<_, ProfileRecord>(&format!("{PROFILE_SELECT} WHERE u.id = ANY($1)"))
            .bind(user_ids)
            .fetch_all(conn)
            .await?;

        Ok(profiles.into_iter().map(Into::into).collect())
    }

    /// Everyone the viewer has not swiped yet, newest accounts first.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn candidates_for(&self, conn: &mut PgConnection, viewer_id: Uuid) -> Result<Vec<Profile>> {
        let profiles = sqlx::query_as::<_, ProfileRecord>(&format!(
            r"
            {PROFILE_SELECT}
            WHERE u.id <> $1
              AND NOT EXISTS (
                  SELECT 1 FROM swipes s WHERE s.swiper_id = $1 AND s.swiped_id = u.id
              )
            ORDER BY u.created_at DESC
            ",
        ))
        .bind(viewer_id)
        .fetch_all(conn)
        .await?;

        Ok(profiles.into_iter().map(Into::into).collect())
    }

    /// Applies a partial profile update. Returns `false` if the user does not
    /// exist. Email, password, and premium status are not reachable from here.
    /// Callers must pass at least one change.
    #[tracing::instrument(level = "debug", skip(self, conn, changes))]
    pub(crate) async fn update_profile(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        changes: &ProfileChanges,
    ) -> Result<bool> {
        let mut builder = QueryBuilder::new("UPDATE users SET ");
        let mut assignments = builder.separated(", ");

        if let Some(name) = &changes.name {
            assignments.push("name = ").push_bind_unseparated(name);
        }
        if let Some(age) = changes.age {
            assignments.push("age = ").push_bind_unseparated(age);
        }
        if let Some(bio) = &changes.bio {
            assignments.push("bio = ").push_bind_unseparated(bio);
        }
        if let Some(images) = &changes.images {
            assignments.push("images = ").push_bind_unseparated(images);
        }
        if let Some(interests) = &changes.interests {
            assignments.push("interests = ").push_bind_unseparated(interests);
        }
        if let Some(phone) = &changes.phone {
            assignments.push("phone = ").push_bind_unseparated(phone);
        }
        if let Some(background) = &changes.background {
            assignments.push("background = ").push_bind_unseparated(background);
        }

        builder.push(" WHERE id = ").push_bind(user_id);
        let result = builder.build().execute(conn).await?;

        Ok(result.rows_affected() == 1)
    }
}
