// src/infrastructure/repositories/rows.rs
use crate::domain::article::{
    Article, ArticleAuthorView, ArticleContent, ArticleId, ArticleSlug, ArticleTitle,
    ArticleWithAuthor,
};
use crate::domain::author::{Author, AuthorId, AuthorName, Email};
use crate::domain::category::{Category, CategoryId, CategoryName, CategorySlug, CategoryStats};
use crate::domain::comment::{Comment, CommentContent, CommentId};
use crate::domain::errors::DomainError;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub(super) struct AuthorRow {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<AuthorRow> for Author {
    type Error = DomainError;

    fn try_from(row: AuthorRow) -> Result<Self, Self::Error> {
        Ok(Author {
            id: AuthorId::new(row.id)?,
            email: Email::new(row.email)?,
            name: AuthorName::new(row.name)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = DomainError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Category {
            id: CategoryId::new(row.id)?,
            name: CategoryName::new(row.name)?,
            slug: CategorySlug::new(row.slug)?,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct CategoryStatsRow {
    pub category_id: i64,
    pub category_name: String,
    pub articles_count: i64,
    pub total_views: i64,
    pub total_comments: i64,
    pub avg_views: f64,
}

impl TryFrom<CategoryStatsRow> for CategoryStats {
    type Error = DomainError;

    fn try_from(row: CategoryStatsRow) -> Result<Self, Self::Error> {
        Ok(CategoryStats {
            category_id: CategoryId::new(row.category_id)?,
            category_name: row.category_name,
            articles_count: row.articles_count,
            total_views: row.total_views,
            total_comments: row.total_comments,
            avg_views: row.avg_views,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct ArticleRow {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub published: bool,
    pub views: i64,
    pub author_id: i64,
    pub category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: ArticleTitle::new(row.title)?,
            slug: ArticleSlug::new(row.slug)?,
            content: ArticleContent::new(row.content)?,
            published: row.published,
            views: row.views,
            author_id: AuthorId::new(row.author_id)?,
            category_id: row.category_id.map(CategoryId::new).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

/// Article columns plus the joined author's columns, prefixed with `author_`.
#[derive(Debug, FromRow)]
pub(super) struct ArticleAuthorRow {
    #[sqlx(flatten)]
    pub article: ArticleRow,
    pub author_email: String,
    pub author_name: String,
    pub author_created_at: DateTime<Utc>,
    pub author_updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleAuthorRow> for ArticleWithAuthor {
    type Error = DomainError;

    fn try_from(row: ArticleAuthorRow) -> Result<Self, Self::Error> {
        let author = Author::try_from(AuthorRow {
            id: row.article.author_id,
            email: row.author_email,
            name: row.author_name,
            created_at: row.author_created_at,
            updated_at: row.author_updated_at,
        })?;
        Ok(ArticleWithAuthor {
            article: Article::try_from(row.article)?,
            author,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct ArticleAuthorViewRow {
    #[sqlx(flatten)]
    pub article: ArticleRow,
    pub author_name: String,
    pub author_email: String,
}

impl TryFrom<ArticleAuthorViewRow> for ArticleAuthorView {
    type Error = DomainError;

    fn try_from(row: ArticleAuthorViewRow) -> Result<Self, Self::Error> {
        Ok(ArticleAuthorView {
            article: Article::try_from(row.article)?,
            author_name: row.author_name,
            author_email: row.author_email,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct CommentRow {
    pub id: i64,
    pub content: String,
    pub article_id: i64,
    pub author_id: i64,
    pub parent_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = DomainError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Comment {
            id: CommentId::new(row.id)?,
            content: CommentContent::new(row.content)?,
            article_id: ArticleId::new(row.article_id)?,
            author_id: AuthorId::new(row.author_id)?,
            parent_id: row.parent_id.map(CommentId::new).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}
