//! Deduplication worker entry point: parse configuration, open a
//! pool, level the schema, install signal handling, and hand control
//! to the dispatcher. Exits 0 on clean shutdown; non-zero on pool
//! init or configuration failure.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use newsroom_dedup_worker::DeduplicationProcessor;
use newsroom_infra_db::{pool, schema};
use newsroom_infra_runtime::{shutdown, Dispatcher, WorkerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = WorkerConfig::parse();
    config.validate()?;

    info!(worker_id = %config.worker_id, "dedup-worker starting");

    let db_pool = pool::connect(
        &config.database_url,
        config.db_pool_min,
        config.db_pool_max,
        config.db_conn_timeout(),
    )
    .await?;

    schema::apply(&db_pool).await?;

    let running = shutdown::install();
    let processor = DeduplicationProcessor::new(db_pool.clone(), config.poll_interval());
    let dispatcher = Dispatcher::new(db_pool.clone(), processor, running);

    dispatcher.run().await;

    db_pool.close().await;
    info!("dedup-worker shut down cleanly");
    Ok(())
}
