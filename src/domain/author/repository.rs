// src/domain/author/repository.rs
use crate::domain::author::{
    entity::{Author, NewAuthor},
    value_objects::AuthorId,
};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn create(&self, author: NewAuthor) -> DomainResult<Author>;

    async fn get_by_id(&self, id: AuthorId) -> DomainResult<Author>;

    /// Absence is an expected outcome here, so it is `Ok(None)` rather than `NotFound`.
    async fn get_by_email(&self, email: &str) -> DomainResult<Option<Author>>;

    async fn get_all(&self) -> DomainResult<Vec<Author>>;

    async fn update(&self, author: &Author) -> DomainResult<Author>;

    /// Removes the author together with their articles and comments.
    async fn delete(&self, id: AuthorId) -> DomainResult<()>;
}
