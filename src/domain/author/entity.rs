// src/domain/author/entity.rs
use crate::domain::author::value_objects::{AuthorId, AuthorName, Email};
use crate::domain::errors::ValidationError;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Author {
    pub id: AuthorId,
    pub email: Email,
    pub name: AuthorName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw input for creating an author.
#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct ValidatedAuthor {
    pub email: Email,
    pub name: AuthorName,
}

impl NewAuthor {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }

    pub fn validate(&self) -> Result<ValidatedAuthor, ValidationError> {
        Ok(ValidatedAuthor {
            email: Email::new(&self.email)?,
            name: AuthorName::new(&self.name)?,
        })
    }
}

impl Author {
    /// Re-checks the mutable fields before a whole-record update.
    pub fn validate(&self) -> Result<ValidatedAuthor, ValidationError> {
        NewAuthor::new(self.email.as_str(), self.name.as_str())
            .validate()
    }

    pub fn rename(&mut self, name: AuthorName) {
        self.name = name;
    }

    pub fn change_email(&mut self, email: Email) {
        self.email = email;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_reports_first_failing_field() {
        let err = NewAuthor::new("not-an-email", "Alice")
            .validate()
            .unwrap_err();
        assert_eq!(err.field, "email");

        let err = NewAuthor::new("alice@example.com", "  ")
            .validate()
            .unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn validate_normalises_fields() {
        let valid = NewAuthor::new(" ALICE@example.com", " Alice Johnson ")
            .validate()
            .unwrap();
        assert_eq!(valid.email.as_str(), "alice@example.com");
        assert_eq!(valid.name.as_str(), "Alice Johnson");
    }
}
