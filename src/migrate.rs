use bistro::Config;
use sqlx_migrator::migrator::{Migrate, Plan};

pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    tracing::info!(url = %config.database.url, "Migrating database");

    let pool = bistro::create_pool(&config.database.url, 1).await?;
    let mut conn = pool.acquire().await?;
    bistro_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);

    pool.close().await;

    Ok(())
}
