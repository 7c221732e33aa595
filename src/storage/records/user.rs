use crate::domain::user::{Profile, User};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub(crate) struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub age: i32,
    pub bio: String,
    pub images: Vec<String>,
    pub interests: Vec<String>,
    pub phone: Option<String>,
    pub background: Option<String>,
    pub created_at: Option<OffsetDateTime>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            password_hash: record.password_hash,
            age: record.age,
            bio: record.bio,
            images: record.images,
            interests: record.interests,
            phone: record.phone,
            background: record.background,
            created_at: record.created_at,
        }
    }
}

/// Row shape for the profile queries, which join `user_premium` and compute
/// the effective premium flag in SQL.
#[derive(sqlx::FromRow)]
pub(crate) struct ProfileRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub bio: String,
    pub images: Vec<String>,
    pub interests: Vec<String>,
    pub phone: Option<String>,
    pub background: Option<String>,
    pub is_premium: bool,
    pub created_at: Option<OffsetDateTime>,
}

impl From<ProfileRecord> for Profile {
    fn from(record: ProfileRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            age: record.age,
            bio: record.bio,
            images: record.images,
            interests: record.interests,
            phone: record.phone,
            background: record.background,
            is_premium: record.is_premium,
            created_at: record.created_at,
        }
    }
}
