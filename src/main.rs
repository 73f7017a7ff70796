use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use doclist_core::{CoreConfig, Directory, DirectoryFetcher};

/// Main entry point for the doclist service
///
/// Starts the REST server and, concurrently, the one-shot fetch of the doctor directory. The
/// server answers straight away; pages rendered before the fetch completes show the loading
/// state.
///
/// # Environment Variables
/// - `DOCLIST_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `DOCLIST_SOURCE_URL`: Doctor directory endpoint (default: the campus mock API)
/// - `DOCLIST_FETCH_TIMEOUT_SECS`: Timeout for the directory fetch (default: 30)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration is invalid or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("doclist=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = CoreConfig::from_env_values(
        std::env::var("DOCLIST_SOURCE_URL").ok(),
        std::env::var("DOCLIST_FETCH_TIMEOUT_SECS").ok(),
    )?;
    let rest_addr = std::env::var("DOCLIST_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let directory = Arc::new(Directory::new());
    let fetcher = DirectoryFetcher::new(&cfg)?;

    tracing::info!("++ Fetching doctors from {}", fetcher.source_url());
    let loader = {
        let directory = directory.clone();
        tokio::spawn(async move { directory.populate(&fetcher).await })
    };

    tracing::info!("++ Starting doclist REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, api_rest::router(AppState::new(directory))).await?;

    loader.abort();
    Ok(())
}
