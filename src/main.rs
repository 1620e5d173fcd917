use std::sync::Arc;

use hoops_watch_lambda_rust::config::Config;
use hoops_watch_lambda_rust::handler::{handler, Request};
use hoops_watch_lambda_rust::watcher::Watcher;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize structured logging with tracing
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .try_init();

    let config = Config::from_env()?;
    info!(targets = config.targets.len(), season_year = config.season_year, url = %config.source_url, "Starting hoops watcher");

    // One watcher per container so the status cache survives warm invocations
    let watcher = Arc::new(Watcher::from_config(&config)?);
    let notifier_config = Arc::new(config.notifier);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Request>| {
        let watcher = Arc::clone(&watcher);
        let notifier_config = Arc::clone(&notifier_config);
        async move { handler(watcher, notifier_config, event).await }
    }))
    .await
}
