//! Default seed script - creates the reference school roster
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed
//! ```

use rand::SeedableRng;
use rand::rngs::StdRng;
use roster::PgDocumentStore;
use seed_data::builders::BatchBuilder;
use seed_data::config::SeedConfig;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    let store = PgDocumentStore::new(pool);
    store.migrate().await?;

    let mut rng = StdRng::seed_from_u64(config.seed);

    let result = BatchBuilder::from_config(&config)
        .with_metrics(true)
        .build(&store, &mut rng)
        .await?;

    // Summary output
    tracing::info!("Seed completed!");
    tracing::info!("  Staff: {}", result.staff().count());
    tracing::info!("  Teachers: {}", result.teachers().count());
    tracing::info!("  Students: {}", result.students().count());
    if let Some(summary) = &result.summary {
        tracing::info!("  Directory entries: {}", summary.directory_entries);
    }
    if let Some(metrics) = &result.metrics {
        tracing::info!(
            "  Took {}ms generating, {}ms seeding",
            metrics.generation_time_ms,
            metrics.seeding_time_ms
        );
    }

    Ok(())
}
