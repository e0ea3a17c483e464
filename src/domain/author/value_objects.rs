// src/domain/author/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult, ValidationError};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AuthorId(pub i64);

impl AuthorId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::validation(
                "author_id",
                "author id must be positive",
            ))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<AuthorId> for i64 {
    fn from(value: AuthorId) -> Self {
        value.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email address, stored trimmed and lower-cased so uniqueness is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Email(String);

impl Email {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = value.as_ref().trim().to_lowercase();
        if value.is_empty() {
            return Err(ValidationError::new("email", "email cannot be empty"));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(ValidationError::new(
                "email",
                "email cannot contain whitespace",
            ));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(ValidationError::new("email", "email must contain '@'"));
        };
        if local.is_empty() || domain.contains('@') {
            return Err(ValidationError::new("email", "email is malformed"));
        }
        let dotted = domain.split('.').collect::<Vec<_>>();
        if dotted.len() < 2 || dotted.iter().any(|label| label.is_empty()) {
            return Err(ValidationError::new(
                "email",
                "email domain must contain a dot-separated host",
            ));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorName(String);

impl AuthorName {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = value.as_ref().trim();
        if value.is_empty() {
            return Err(ValidationError::new("name", "name cannot be empty"));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<AuthorName> for String {
    fn from(value: AuthorName) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalised() {
        let email = Email::new("  Alice@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn email_rejects_malformed_input() {
        for bad in [
            "",
            "alice",
            "@example.com",
            "alice@",
            "alice@example",
            "a b@example.com",
            "a@@example.com",
            "alice@example..com",
        ] {
            let err = Email::new(bad).unwrap_err();
            assert_eq!(err.field, "email", "input {bad:?}");
        }
    }

    #[test]
    fn name_is_trimmed_and_required() {
        assert_eq!(AuthorName::new("  Bob ").unwrap().as_str(), "Bob");
        assert_eq!(AuthorName::new("   ").unwrap_err().field, "name");
    }

    #[test]
    fn author_id_must_be_positive() {
        assert!(AuthorId::new(0).is_err());
        assert_eq!(i64::from(AuthorId::new(7).unwrap()), 7);
    }
}
