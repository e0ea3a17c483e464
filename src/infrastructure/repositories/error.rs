use crate::domain::errors::{DomainError, ValidationError};

const CNT_AUTHOR_EMAIL: &str = "authors_email_key";
const CNT_AUTHOR_NAME_CHECK: &str = "authors_name_not_blank_chk";
const CNT_CATEGORY_NAME: &str = "categories_name_key";
const CNT_CATEGORY_SLUG: &str = "categories_slug_key";
const CNT_ARTICLE_SLUG: &str = "articles_slug_key";
const CNT_ARTICLE_AUTHOR: &str = "articles_author_id_fkey";
const CNT_ARTICLE_CATEGORY: &str = "articles_category_id_fkey";
const CNT_ARTICLE_TITLE_CHECK: &str = "articles_title_length_chk";
const CNT_ARTICLE_CONTENT_CHECK: &str = "articles_content_length_chk";
const CNT_ARTICLE_VIEWS_CHECK: &str = "articles_views_non_negative_chk";
const CNT_COMMENT_ARTICLE: &str = "comments_article_id_fkey";
const CNT_COMMENT_AUTHOR: &str = "comments_author_id_fkey";
const CNT_COMMENT_PARENT: &str = "comments_parent_id_fkey";
const CNT_COMMENT_CONTENT_CHECK: &str = "comments_content_length_chk";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                if let Some(mapped) = map_constraint(constraint) {
                    return mapped;
                }
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::DuplicateKey(format!(
                            "unique constraint violated: {}",
                            db_err.message()
                        ));
                    }
                    "23503" | "23502" | "23514" => {
                        return DomainError::ConstraintViolation(db_err.message().to_string());
                    }
                    "40001" | "40P01" => {
                        return DomainError::TransactionAborted(db_err.message().to_string());
                    }
                    "57014" => {
                        return DomainError::Cancelled(db_err.message().to_string());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("row not found".into()),
        sqlx::Error::PoolTimedOut => {
            DomainError::Persistence("timed out acquiring a database connection".into())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

fn map_constraint(constraint: &str) -> Option<DomainError> {
    let mapped = match constraint {
        CNT_AUTHOR_EMAIL => DomainError::DuplicateKey("author email already exists".into()),
        CNT_CATEGORY_NAME => DomainError::DuplicateKey("category name already exists".into()),
        CNT_CATEGORY_SLUG => DomainError::DuplicateKey("category slug already exists".into()),
        CNT_ARTICLE_SLUG => DomainError::DuplicateKey("article slug already exists".into()),
        CNT_ARTICLE_AUTHOR | CNT_COMMENT_AUTHOR => DomainError::NotFound("author not found".into()),
        CNT_ARTICLE_CATEGORY => DomainError::NotFound("category not found".into()),
        CNT_COMMENT_ARTICLE => DomainError::NotFound("article not found".into()),
        CNT_COMMENT_PARENT => DomainError::NotFound("parent comment not found".into()),
        CNT_AUTHOR_NAME_CHECK => ValidationError::new("name", "name cannot be empty").into(),
        CNT_ARTICLE_TITLE_CHECK => ValidationError::new("title", "title is too short").into(),
        CNT_ARTICLE_CONTENT_CHECK | CNT_COMMENT_CONTENT_CHECK => {
            ValidationError::new("content", "content is too short").into()
        }
        CNT_ARTICLE_VIEWS_CHECK => {
            ValidationError::new("views", "views cannot be negative").into()
        }
        _ => return None,
    };
    Some(mapped)
}

/// Commit failures that are not otherwise classified mean the unit of work did not land.
pub fn map_commit(err: sqlx::Error) -> DomainError {
    match map_sqlx(err) {
        DomainError::Persistence(msg) => DomainError::TransactionAborted(msg),
        other => other,
    }
}
