// src/ports/events.rs
use crate::domain::article::ArticleId;
use crate::domain::author::AuthorId;
use crate::domain::category::CategoryId;
use crate::domain::comment::CommentId;
use chrono::{DateTime, Utc};

/// Notifications emitted by repositories after a write has been committed.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    AuthorCreated {
        id: AuthorId,
        email: String,
        at: DateTime<Utc>,
    },
    CategoryCreated {
        id: CategoryId,
        slug: String,
        at: DateTime<Utc>,
    },
    ArticleCreated {
        id: ArticleId,
        author_id: AuthorId,
        slug: String,
        at: DateTime<Utc>,
    },
    ArticlePublished {
        id: ArticleId,
        at: DateTime<Utc>,
    },
    CommentCreated {
        id: CommentId,
        article_id: ArticleId,
        parent_id: Option<CommentId>,
        at: DateTime<Utc>,
    },
}

impl DomainEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AuthorCreated { .. } => "author.created",
            Self::CategoryCreated { .. } => "category.created",
            Self::ArticleCreated { .. } => "article.created",
            Self::ArticlePublished { .. } => "article.published",
            Self::CommentCreated { .. } => "comment.created",
        }
    }
}

/// Receives post-commit notifications. Implementations must not block.
pub trait EventSink: Send + Sync {
    fn notify(&self, event: &DomainEvent);
}
