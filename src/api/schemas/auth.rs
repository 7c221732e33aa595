use crate::api::schemas::users::Profile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl SignupRequest {
    /// Validates the signup payload.
    ///
    /// # Errors
    /// Returns an error message if a required field is missing or blank, or
    /// if the password exceeds the length bound.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name cannot be empty".into());
        }
        if self.email.trim().is_empty() {
            return Err("Email cannot be empty".into());
        }
        if self.password.is_empty() {
            return Err("Password cannot be empty".into());
        }
        if self.password.len() > 512 {
            return Err("Password is too long (max 512 characters)".into());
        }
        Ok(())
    }
}

/// Missing credentials are not an error here: they simply fail the lookup,
/// so a probing client cannot tell a bad email from a bad password.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: Profile,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest { name: name.into(), email: email.into(), password: password.into() }
    }

    #[test]
    fn test_validate_signup_success() {
        assert!(request("Ada", "ada@example.com", "hunter2hunter2").validate().is_ok());
    }

    #[test]
    fn test_validate_signup_missing_fields() {
        assert_eq!(request("", "ada@example.com", "pw").validate().unwrap_err(), "Name cannot be empty");
        assert_eq!(request("Ada", "  ", "pw").validate().unwrap_err(), "Email cannot be empty");
        assert_eq!(request("Ada", "ada@example.com", "").validate().unwrap_err(), "Password cannot be empty");
    }

    #[test]
    fn test_validate_signup_password_bound() {
        let req = request("Ada", "ada@example.com", &"x".repeat(513));
        assert_eq!(req.validate().unwrap_err(), "Password is too long (max 512 characters)");
    }

    #[test]
    fn test_missing_json_fields_deserialize_as_blank() {
        let req: SignupRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_err());
    }
}
