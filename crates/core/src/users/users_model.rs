//! Users domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::enums::Role;
use crate::errors::{Result, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: Role,
}

/// Input model for creating or updating a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub role: Role,
}

impl UserInput {
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field.to_string()).into());
            }
        }
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidInput(format!(
                "'{}' is not a valid email address",
                self.email
            ))
            .into());
        }
        Ok(())
    }
}

/// Stored password hash of a user, `base64(derived):base64(salt)`.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSecret {
    pub id: String,
    pub user_id: String,
    pub secret: String,
}

/// A login record. `logout_time` equals `login_time` until the session is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub id: String,
    pub user_id: String,
    pub login_time: NaiveDateTime,
    pub logout_time: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The user's email.
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPassword {
    pub email: String,
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

/// Identity details embedded into an issued access token.
#[derive(Debug, Clone, PartialEq)]
pub struct UserIdentity {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl From<&User> for UserIdentity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
        }
    }
}
