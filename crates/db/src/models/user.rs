//! Console user model and DTOs.

use opsconsole_core::error::CoreError;
use opsconsole_core::types::{DbId, Timestamp};
use opsconsole_core::user::{validate_email, validate_name, UserRole};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: Timestamp,
}

/// DTO for creating a user.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_name(&self.name)?;
        validate_email(&self.email)
    }
}

/// DTO for a partial user update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
}

impl UpdateUser {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

impl User {
    pub fn apply(&mut self, update: &UpdateUser) {
        if let Some(name) = &update.name {
            self.name = name.trim().to_string();
        }
        if let Some(email) = &update.email {
            self.email = email.trim().to_string();
        }
        if let Some(role) = update.role {
            self.role = role;
        }
    }
}
