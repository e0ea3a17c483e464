use crate::domain::article::entity::{
    Article, ArticleAuthorView, ArticleWithAuthor, NewArticle, PublishOutcome,
};
use crate::domain::article::value_objects::ArticleId;
use crate::domain::author::AuthorId;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn create(&self, article: NewArticle) -> DomainResult<Article>;

    async fn get_by_id(&self, id: ArticleId) -> DomainResult<ArticleWithAuthor>;

    /// The only read path that also returns soft-deleted articles.
    async fn get_by_id_including_deleted(&self, id: ArticleId) -> DomainResult<Article>;

    async fn get_by_slug(&self, slug: &str) -> DomainResult<ArticleWithAuthor>;

    async fn get_by_author_id(&self, author_id: AuthorId) -> DomainResult<Vec<Article>>;

    async fn get_published(&self) -> DomainResult<Vec<ArticleWithAuthor>>;

    async fn update(&self, article: &Article) -> DomainResult<Article>;

    async fn publish(&self, id: ArticleId) -> DomainResult<PublishOutcome>;

    /// Returns the view count after the increment.
    async fn increment_views(&self, id: ArticleId) -> DomainResult<i64>;

    async fn delete(&self, id: ArticleId) -> DomainResult<()>;

    /// Resolves the author by email (creating it when absent) and attaches a new
    /// article to it, all in one transaction.
    async fn create_with_author(
        &self,
        author_name: &str,
        author_email: &str,
        title: &str,
        content: &str,
    ) -> DomainResult<ArticleWithAuthor>;

    async fn get_with_author(&self, id: ArticleId) -> DomainResult<ArticleAuthorView>;
}
