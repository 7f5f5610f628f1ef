use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating identities
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Phone number must not be empty")]
    Empty,

    #[error("'{0}' is not a phone number (expected + followed by 6-15 digits)")]
    InvalidNumber(String),

    #[error("Failed to compile phone number pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// A phone-number identity the user can sign in as
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub label: String,
    pub number: String,
}

impl Identity {
    /// Create an identity, validating the phone number
    pub fn new(label: impl Into<String>, number: impl Into<String>) -> Result<Self, IdentityError> {
        let identity = Self {
            label: label.into(),
            number: number.into(),
        };
        identity.validate()?;
        Ok(identity)
    }

    /// Check that `number` looks like an E.164 phone number
    pub fn validate(&self) -> Result<(), IdentityError> {
        let number = self.number.trim();
        if number.is_empty() {
            return Err(IdentityError::Empty);
        }

        let number_re = Regex::new(r"^\+[0-9]{6,15}$")?;
        if !number_re.is_match(number) {
            return Err(IdentityError::InvalidNumber(self.number.clone()));
        }

        Ok(())
    }

    /// Label shown in the sign-in list, e.g. `Test Number 1 (+13613392529)`
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.label, self.number)
    }
}
