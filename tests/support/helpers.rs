// tests/support/helpers.rs
use super::mocks::{CapturingEventSink, FixedClock};
use pressroom_core::config::AppConfig;
use pressroom_core::domain::article::{Article, ArticleRepository, NewArticle};
use pressroom_core::domain::author::{Author, AuthorRepository, NewAuthor};
use pressroom_core::domain::category::{Category, CategoryRepository, NewCategory};
use pressroom_core::infrastructure::database::{self, Database};
use pressroom_core::infrastructure::repositories::{Repositories, RepositoryContext};
use pressroom_core::infrastructure::util::DefaultSlugGenerator;
use std::sync::Arc;

/// Repositories wired to the integration database plus the sink they report to.
pub struct Harness {
    pub db: Database,
    pub repos: Repositories,
    pub events: CapturingEventSink,
}

/// Connects to `DATABASE_URL` and applies migrations, or returns `None` (after
/// printing why) unless `RUN_DB_INTEGRATION=1`.
pub async fn harness() -> Option<Harness> {
    if std::env::var("RUN_DB_INTEGRATION").unwrap_or_default() != "1" {
        eprintln!(
            "skipping integration test: set RUN_DB_INTEGRATION=1 and DATABASE_URL to run"
        );
        return None;
    }

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");
    let config = AppConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some(database_url.clone()),
        "DB_MAX_CONNECTIONS" => Some("20".into()),
        "DB_ACQUIRE_TIMEOUT_SECS" => Some("30".into()),
        _ => None,
    })
    .expect("test config");

    let pool = database::init_pool(&config).await.expect("init pool");
    database::run_migrations(&pool)
        .await
        .expect("run migrations");

    let db = Database::new(pool);
    let events = CapturingEventSink::new();
    let ctx = RepositoryContext::new(
        db.clone(),
        Arc::new(FixedClock),
        Arc::new(DefaultSlugGenerator),
    )
    .with_event_sink(Arc::new(events.clone()));

    Some(Harness {
        db,
        repos: Repositories::new(ctx),
        events,
    })
}

/// Short random token that keeps fixtures from colliding across test runs.
pub fn unique() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..12].to_string()
}

pub fn unique_email(tag: &str) -> String {
    format!("{tag}-{}@example.com", unique())
}

pub fn unique_title(tag: &str) -> String {
    format!("{tag} {}", unique())
}

pub async fn seed_author(h: &Harness, tag: &str) -> Author {
    h.repos
        .authors
        .create(NewAuthor::new(unique_email(tag), format!("{tag} author")))
        .await
        .expect("seed author")
}

pub async fn seed_category(h: &Harness, tag: &str) -> Category {
    h.repos
        .categories
        .create(NewCategory::new(unique_title(tag), "seeded category"))
        .await
        .expect("seed category")
}

pub async fn seed_article(h: &Harness, author: &Author, tag: &str) -> Article {
    h.repos
        .articles
        .create(NewArticle::new(
            author.id,
            unique_title(tag),
            "Body text long enough to pass validation.",
        ))
        .await
        .expect("seed article")
}
