use tracing_subscriber::EnvFilter;

use mindcare_lambda::config::Config;
use mindcare_lambda::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;
    let state = AppState::from_config(&config).await?;

    tracing::info!(
        store = ?config.store,
        analytics_max_days = config.analytics_max_days,
        "starting mindcare api"
    );

    let app = mindcare_lambda::router(state);

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
