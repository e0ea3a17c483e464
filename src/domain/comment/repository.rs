// src/domain/comment/repository.rs
use crate::domain::article::ArticleId;
use crate::domain::comment::{
    entity::{Comment, NewComment},
    thread::CommentThread,
    value_objects::CommentId,
};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: NewComment) -> DomainResult<Comment>;

    /// Every comment on the article, all tree levels, oldest first.
    async fn get_by_article_id(&self, article_id: ArticleId) -> DomainResult<Vec<Comment>>;

    /// Direct children of `parent_id`, oldest first.
    async fn get_replies(&self, parent_id: CommentId) -> DomainResult<Vec<Comment>>;

    async fn get_thread(&self, article_id: ArticleId) -> DomainResult<CommentThread>;

    /// Deletes the comment and all of its replies, transitively.
    async fn delete(&self, id: CommentId) -> DomainResult<()>;
}
