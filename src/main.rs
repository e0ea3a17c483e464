use anyhow::Result;
use pressroom_core::config::AppConfig;
use pressroom_core::domain::category::CategoryRepository;
use pressroom_core::infrastructure::{
    database::{self, Database},
    events::TracingEventSink,
    repositories::{Repositories, RepositoryContext},
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(&config).await?;
    database::run_migrations(&pool).await?;
    tracing::info!(
        max_connections = config.max_connections(),
        "database ready"
    );

    let ctx = RepositoryContext::new(
        Database::new(pool),
        Arc::new(SystemClock),
        Arc::new(DefaultSlugGenerator),
    )
    .with_event_sink(Arc::new(TracingEventSink));
    let repos = Repositories::new(ctx);

    let stats = repos.categories.get_with_article_counts().await?;
    tracing::info!(categories = stats.len(), "category statistics loaded");
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}
