pub mod handlers;
pub mod types;

use crate::{
    Result,
    agent::Agent,
    cluster::KubeClusterReader,
    config::Config,
    llm::OpenAiClient,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use handlers::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/query", post(handlers::query))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let cluster = KubeClusterReader::try_default()
        .await?
        .with_log_tail_lines(config.cluster.log_tail_lines);
    let llm_client = OpenAiClient::new(config.llm.clone());

    info!(
        "Using model {} against namespace {}",
        llm_client.model(),
        config.cluster.namespace
    );

    let agent = Agent::new(
        Box::new(cluster),
        Box::new(llm_client),
        config.cluster.namespace.clone(),
    );

    let app = router(AppState::new(agent));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
