// src/domain/comment/entity.rs
use crate::domain::article::ArticleId;
use crate::domain::author::AuthorId;
use crate::domain::comment::value_objects::{CommentContent, CommentId};
use crate::domain::errors::ValidationError;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: CommentContent,
    pub article_id: ArticleId,
    pub author_id: AuthorId,
    pub parent_id: Option<CommentId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub article_id: ArticleId,
    pub author_id: AuthorId,
    pub parent_id: Option<CommentId>,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct ValidatedComment {
    pub article_id: ArticleId,
    pub author_id: AuthorId,
    pub parent_id: Option<CommentId>,
    pub content: CommentContent,
}

impl NewComment {
    pub fn new(article_id: ArticleId, author_id: AuthorId, content: impl Into<String>) -> Self {
        Self {
            article_id,
            author_id,
            parent_id: None,
            content: content.into(),
        }
    }

    pub fn reply_to(mut self, parent_id: CommentId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Checks the fields that can be validated without the store. Parent/article
    /// consistency needs the parent row and is checked by the repository.
    pub fn validate(&self) -> Result<ValidatedComment, ValidationError> {
        Ok(ValidatedComment {
            article_id: self.article_id,
            author_id: self.author_id,
            parent_id: self.parent_id,
            content: CommentContent::new(&self.content)?,
        })
    }
}

/// Fails when a reply's parent lives under a different article.
pub fn ensure_same_article(
    article_id: ArticleId,
    parent_article_id: ArticleId,
) -> Result<(), ValidationError> {
    if article_id == parent_article_id {
        Ok(())
    } else {
        Err(ValidationError::new(
            "parent_id",
            format!(
                "parent comment belongs to article {parent_article_id}, not article {article_id}"
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_keeps_parent_reference() {
        let article = ArticleId::new(1).unwrap();
        let author = AuthorId::new(2).unwrap();
        let parent = CommentId::new(3).unwrap();
        let valid = NewComment::new(article, author, "I agree!")
            .reply_to(parent)
            .validate()
            .unwrap();
        assert_eq!(valid.parent_id, Some(parent));
        assert_eq!(valid.content.as_str(), "I agree!");
    }

    #[test]
    fn cross_article_parent_is_rejected() {
        let a = ArticleId::new(1).unwrap();
        let b = ArticleId::new(2).unwrap();
        assert!(ensure_same_article(a, a).is_ok());
        let err = ensure_same_article(a, b).unwrap_err();
        assert_eq!(err.field, "parent_id");
    }
}
