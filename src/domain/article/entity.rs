// src/domain/article/entity.rs
use crate::domain::article::services::derive_slug;
use crate::domain::article::value_objects::{ArticleContent, ArticleId, ArticleSlug, ArticleTitle};
use crate::domain::author::{Author, AuthorId};
use crate::domain::category::CategoryId;
use crate::domain::errors::ValidationError;
use crate::ports::SlugGenerator;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub content: ArticleContent,
    pub published: bool,
    pub views: i64,
    pub author_id: AuthorId,
    pub category_id: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn set_content(&mut self, title: ArticleTitle, content: ArticleContent) {
        self.title = title;
        self.content = content;
    }

    pub fn set_category(&mut self, category_id: Option<CategoryId>) {
        self.category_id = category_id;
    }
}

/// Article together with its eagerly loaded author.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleWithAuthor {
    pub article: Article,
    pub author: Author,
}

/// Article with the author's name and email, read in one round trip.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleAuthorView {
    pub article: Article,
    pub author_name: String,
    pub author_email: String,
}

/// Result of a publish request. Both variants are successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Published,
    AlreadyPublished,
}

/// Raw input for creating an article.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub author_id: AuthorId,
    pub category_id: Option<CategoryId>,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub views: i64,
}

#[derive(Debug, Clone)]
pub struct ValidatedArticle {
    pub author_id: AuthorId,
    pub category_id: Option<CategoryId>,
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub content: ArticleContent,
    pub published: bool,
    pub views: i64,
}

impl NewArticle {
    pub fn new(author_id: AuthorId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author_id,
            category_id: None,
            title: title.into(),
            content: content.into(),
            published: false,
            views: 0,
        }
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    pub fn with_views(mut self, views: i64) -> Self {
        self.views = views;
        self
    }

    /// Trims title and content, checks their lengths and derives the slug from the
    /// trimmed title.
    pub fn validate(
        &self,
        slugger: &dyn SlugGenerator,
    ) -> Result<ValidatedArticle, ValidationError> {
        let title = ArticleTitle::new(&self.title)?;
        let content = ArticleContent::new(&self.content)?;
        if self.views < 0 {
            return Err(ValidationError::new("views", "views cannot be negative"));
        }
        let slug = ArticleSlug::new(derive_slug(slugger, "article", title.as_str()))?;

        Ok(ValidatedArticle {
            author_id: self.author_id,
            category_id: self.category_id,
            title,
            slug,
            content,
            published: self.published,
            views: self.views,
        })
    }
}
