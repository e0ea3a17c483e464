use crate::domain::errors::{DomainError, DomainResult, ValidationError};
use serde::Serialize;
use std::fmt;

pub const MIN_TITLE_CHARS: usize = 3;
pub const MIN_CONTENT_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ArticleId(pub i64);

impl ArticleId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::validation(
                "article_id",
                "article id must be positive",
            ))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<ArticleId> for i64 {
    fn from(value: ArticleId) -> Self {
        value.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn trimmed_with_min(
    field: &'static str,
    value: &str,
    min_chars: usize,
) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.chars().count() < min_chars {
        return Err(ValidationError::new(
            field,
            format!("{field} must be at least {min_chars} characters"),
        ));
    }
    Ok(value.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleTitle(String);

impl ArticleTitle {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        trimmed_with_min("title", value.as_ref(), MIN_TITLE_CHARS)
            .map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ArticleTitle> for String {
    fn from(value: ArticleTitle) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleSlug(String);

impl ArticleSlug {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::new("slug", "slug cannot be empty"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ArticleSlug> for String {
    fn from(value: ArticleSlug) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleContent(String);

impl ArticleContent {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        trimmed_with_min("content", value.as_ref(), MIN_CONTENT_CHARS)
            .map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ArticleContent> for String {
    fn from(value: ArticleContent) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed_before_length_check() {
        assert_eq!(ArticleTitle::new("  Go  ").unwrap_err().field, "title");
        assert_eq!(ArticleTitle::new("  Rust ").unwrap().as_str(), "Rust");
    }

    #[test]
    fn title_counts_characters_not_bytes() {
        assert!(ArticleTitle::new("日本語").is_ok());
        assert!(ArticleTitle::new("日本").is_err());
    }

    #[test]
    fn content_requires_ten_characters() {
        let err = ArticleContent::new("too short").unwrap_err();
        assert_eq!(err.field, "content");
        assert!(err.reason.contains("10"));
        assert!(ArticleContent::new(" ten chars! ").is_ok());
    }
}
