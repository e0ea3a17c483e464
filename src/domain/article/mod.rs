pub mod entity;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{
    Article, ArticleAuthorView, ArticleWithAuthor, NewArticle, PublishOutcome, ValidatedArticle,
};
pub use repository::ArticleRepository;
pub use value_objects::{ArticleContent, ArticleId, ArticleSlug, ArticleTitle};
