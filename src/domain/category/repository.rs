// src/domain/category/repository.rs
use crate::domain::category::{
    entity::{Category, CategoryStats, NewCategory},
    value_objects::CategoryId,
};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: NewCategory) -> DomainResult<Category>;

    /// Newest first.
    async fn get_all(&self) -> DomainResult<Vec<Category>>;

    async fn get_by_id(&self, id: CategoryId) -> DomainResult<Category>;

    async fn get_by_slug(&self, slug: &str) -> DomainResult<Category>;

    /// Deletes the category; its articles survive with the category cleared.
    async fn delete(&self, id: CategoryId) -> DomainResult<()>;

    async fn get_with_article_counts(&self) -> DomainResult<Vec<CategoryStats>>;
}
