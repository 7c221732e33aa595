use time::OffsetDateTime;
use uuid::Uuid;

/// A full account row, including the password hash. Only the auth paths see this.
#[derive(Debug, Clone)]
pub struct User {
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

/// A partial profile edit. `None` fields are left untouched. Email, password,
/// and premium status deliberately have no slot here.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub bio: Option<String>,
    pub images: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
    pub phone: Option<String>,
    pub background: Option<String>,
}

impl ProfileChanges {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.bio.is_none()
            && self.images.is_none()
            && self.interests.is_none()
            && self.phone.is_none()
            && self.background.is_none()
    }
}

/// What other members (and the owner) see of an account. The premium flag is
/// the effective one: a lapsed entitlement reads as `false` even before the
/// sweeper has run.
#[derive(Debug, Clone)]
pub struct Profile {
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
