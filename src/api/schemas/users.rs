use crate::domain::user::{Profile as DomainProfile, ProfileChanges};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A member profile as it appears on the wire. `is_premium` is the effective
/// flag, not the stored one.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
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
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl From<DomainProfile> for Profile {
    fn from(profile: DomainProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            age: profile.age,
            bio: profile.bio,
            images: profile.images,
            interests: profile.interests,
            phone: profile.phone,
            background: profile.background,
            is_premium: profile.is_premium,
            created_at: profile.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub bio: Option<String>,
    pub images: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
    pub phone: Option<String>,
    pub background: Option<String>,
}

impl UpdateProfileRequest {
    /// Validates the profile edit payload. Absent fields are left untouched
    /// and are never an error.
    ///
    /// # Errors
    /// Returns an error message if a present field fails its bounds check.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err("Name cannot be empty".into());
        }
        if let Some(age) = self.age
            && !(18..=120).contains(&age)
        {
            return Err("Age must be between 18 and 120".into());
        }
        if let Some(bio) = &self.bio
            && bio.len() > 4096
        {
            return Err("Bio is too long (max 4096 characters)".into());
        }
        if let Some(images) = &self.images
            && images.len() > 9
        {
            return Err("Too many images (max 9)".into());
        }
        Ok(())
    }
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(request: UpdateProfileRequest) -> Self {
        Self {
            name: request.name,
            age: request.age,
            bio: request.bio,
            images: request.images,
            interests: request.interests,
            phone: request.phone,
            background: request.background,
        }
    }
}
