//! The signed-in operator's editable profile card.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::user::{validate_email, validate_name};

const MAX_BIO_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorProfile {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub bio: String,
}

impl OperatorProfile {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        if self.bio.chars().count() > MAX_BIO_CHARS {
            return Err(CoreError::Validation(format!(
                "bio must be at most {MAX_BIO_CHARS} characters"
            )));
        }
        Ok(())
    }
}

impl Default for OperatorProfile {
    fn default() -> Self {
        Self {
            name: "John Doe".into(),
            email: "john.doe@company.com".into(),
            role: "Admin".into(),
            department: "IT Operations".into(),
            phone: "+1 (555) 123-4567".into(),
            location: "San Francisco, CA".into(),
            timezone: "PST".into(),
            bio: "Senior IT Administrator with 8+ years of experience in managing enterprise \
                  systems and leading technical teams."
                .into(),
        }
    }
}
