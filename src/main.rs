use anyhow::Context;
use mena::bootstrap::{
    apply_env_overrides, load_config, resolve_config_path, resolve_data_dir, run_app,
    tracing::init_tracing_subscriber,
};
use mn_core::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    let config = match resolve_config_path() {
        Some(path) => load_config(&path)?,
        None => AppConfig::empty(),
    };
    let config = apply_env_overrides(config);

    let data_dir = resolve_data_dir(&config).context("Failed to resolve data directory")?;
    init_tracing_subscriber(Some(&data_dir.join("logs")))
        .context("Failed to initialize tracing")?;

    let summary = run_app(config).await?;
    tracing::info!(
        backend = ?summary.backend,
        state = summary.state.as_str(),
        "mena exited"
    );
    Ok(())
}
