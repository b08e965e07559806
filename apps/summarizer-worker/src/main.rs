//! Summarization worker entry point — same shell as `dedup-worker`,
//! different processor plugged into the same dispatcher.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use newsroom_infra_db::{pool, schema};
use newsroom_infra_runtime::{shutdown, Dispatcher, WorkerConfig};
use newsroom_summarizer_worker::SummarizationProcessor;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = WorkerConfig::parse();
    config.validate()?;

    info!(worker_id = %config.worker_id, "summarizer-worker starting");

    let db_pool = pool::connect(
        &config.database_url,
        config.db_pool_min,
        config.db_pool_max,
        config.db_conn_timeout(),
    )
    .await?;

    schema::apply(&db_pool).await?;

    let running = shutdown::install();
    let processor = SummarizationProcessor::new(db_pool.clone(), config.poll_interval());
    let dispatcher = Dispatcher::new(db_pool.clone(), processor, running);

    dispatcher.run().await;

    db_pool.close().await;
    info!("summarizer-worker shut down cleanly");
    Ok(())
}
