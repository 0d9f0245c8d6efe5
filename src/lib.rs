pub mod config;
pub mod db;
pub mod observability;

pub use config::Config;
pub use db::create_pool;

/// Opens the configured database as a single read/write pool.
pub async fn connect(config: &Config) -> anyhow::Result<bistro_shared::State> {
    let pool = create_pool(&config.database.url, config.database.max_connections).await?;

    Ok(bistro_shared::State::single(pool))
}
