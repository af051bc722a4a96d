//! Status summary CLI commands
//!
//! `service-status render`, `service-status options`, `service-status init-db`

use anyhow::{Context, Result};
use service_status_core::{BlockConfiguration, BlockForm, StatusBlockSettings, StatusSummaryBuilder};
use service_status_db::{ContentPool, SqlContentStore, install_schema};
use service_status_render::SummaryRenderer;
use std::sync::Arc;

/// Build the summary and print the fragment, or write it to `output`.
pub async fn run_render(
    config_path: &str,
    settings_path: Option<&str>,
    database: Option<&str>,
    output: Option<&str>,
) -> Result<()> {
    let config = BlockConfiguration::load(config_path)
        .with_context(|| format!("Failed to load block configuration: {}", config_path))?;
    let settings = load_settings(settings_path)?;
    let store = Arc::new(open_store(&settings, database).await?);

    let builder = StatusSummaryBuilder::from_settings(&settings, store.clone(), store.clone());
    let summary = builder.build_summary(&config).await;
    let renderer = SummaryRenderer::new();

    match output {
        Some(dir) => {
            let result = renderer.generate(&summary, dir)?;
            println!("✓ Status summary rendered");
            println!("  HTML: {}", result.html_path.display());
            println!("  JSON: {}", result.summary_json_path.display());
        }
        None => println!("{}", renderer.render_fragment(&summary)),
    }

    store.pool().close().await;
    Ok(())
}

/// Print the checkbox options as `id<TAB>name` lines.
pub async fn run_options(settings_path: Option<&str>, database: Option<&str>) -> Result<()> {
    let settings = load_settings(settings_path)?;
    let store = Arc::new(open_store(&settings, database).await?);

    let form = BlockForm::new(store.clone()).with_content_type(settings.content_type.clone());
    let options = form
        .service_options()
        .await
        .context("Failed to query services")?;

    if options.is_empty() {
        println!("No published services of type {}", settings.content_type);
    }
    for (id, name) in options {
        println!("{}\t{}", id, name);
    }

    store.pool().close().await;
    Ok(())
}

pub async fn run_init_db(database: &str) -> Result<()> {
    let pool = ContentPool::create(database).await?;
    install_schema(&pool)
        .await
        .context("Failed to install schema")?;
    println!("✓ Schema installed in {}", database);
    pool.close().await;
    Ok(())
}

fn load_settings(path: Option<&str>) -> Result<StatusBlockSettings> {
    match path {
        Some(path) => StatusBlockSettings::load(path)
            .with_context(|| format!("Failed to load settings: {}", path)),
        None => Ok(StatusBlockSettings::default()),
    }
}

async fn open_store(settings: &StatusBlockSettings, database: Option<&str>) -> Result<SqlContentStore> {
    let url = database
        .or(settings.database_url.as_deref())
        .context("No database URL given; pass --database or set database_url in the settings")?;

    let pool = ContentPool::connect(url).await?;
    pool.ping().await?;
    tracing::debug!(url, "Opened content store");
    Ok(SqlContentStore::new(pool))
}
