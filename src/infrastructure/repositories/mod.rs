// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_article;
mod postgres_author;
mod postgres_category;
mod postgres_comment;
mod rows;

pub use error::{map_commit, map_sqlx};
pub use postgres_article::PostgresArticleRepository;
pub use postgres_author::PostgresAuthorRepository;
pub use postgres_category::PostgresCategoryRepository;
pub use postgres_comment::PostgresCommentRepository;

use crate::infrastructure::database::Database;
use crate::ports::{Clock, EventSink, SlugGenerator};
use std::sync::Arc;

/// Shared collaborators handed to every Postgres repository.
#[derive(Clone)]
pub struct RepositoryContext {
    pub db: Database,
    pub clock: Arc<dyn Clock>,
    pub slugger: Arc<dyn SlugGenerator>,
    pub events: Option<Arc<dyn EventSink>>,
}

impl RepositoryContext {
    pub fn new(db: Database, clock: Arc<dyn Clock>, slugger: Arc<dyn SlugGenerator>) -> Self {
        Self {
            db,
            clock,
            slugger,
            events: None,
        }
    }

    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.events = Some(sink);
        self
    }

    pub(crate) fn emit(&self, event: &crate::ports::DomainEvent) {
        if let Some(sink) = &self.events {
            sink.notify(event);
        }
    }
}

/// The full repository set over one database handle.
#[derive(Clone)]
pub struct Repositories {
    pub authors: PostgresAuthorRepository,
    pub categories: PostgresCategoryRepository,
    pub articles: PostgresArticleRepository,
    pub comments: PostgresCommentRepository,
}

impl Repositories {
    pub fn new(ctx: RepositoryContext) -> Self {
        Self {
            authors: PostgresAuthorRepository::new(ctx.clone()),
            categories: PostgresCategoryRepository::new(ctx.clone()),
            articles: PostgresArticleRepository::new(ctx.clone()),
            comments: PostgresCommentRepository::new(ctx),
        }
    }
}
