// src/domain/comment/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult, ValidationError};
use serde::Serialize;
use std::fmt;

pub const MIN_COMMENT_CHARS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CommentId(pub i64);

impl CommentId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::validation(
                "comment_id",
                "comment id must be positive",
            ))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<CommentId> for i64 {
    fn from(value: CommentId) -> Self {
        value.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentContent(String);

impl CommentContent {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = value.as_ref().trim();
        if value.chars().count() < MIN_COMMENT_CHARS {
            return Err(ValidationError::new(
                "content",
                format!("content must be at least {MIN_COMMENT_CHARS} characters"),
            ));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_needs_three_characters() {
        assert!(CommentContent::new("ok").is_err());
        assert!(CommentContent::new("  ok  ").is_err());
        assert_eq!(CommentContent::new(" +1! ").unwrap().as_str(), "+1!");
    }
}
