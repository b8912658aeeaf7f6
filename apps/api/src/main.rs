mod classify;
mod config;
mod errors;
mod inference;
mod models;
mod routes;
mod state;
mod text;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::inference::InferenceEngine;
use crate::routes::build_router;
use crate::state::AppState;
use crate::text::LinguisticResources;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Classifier v{}", env!("CARGO_PKG_VERSION"));

    // Stop words and lemma data must be present before the first normalize call.
    let resources = LinguisticResources::load(&config.nltk_data)
        .inspect_err(|e| error!("Refusing to start: {e}"))
        .with_context(|| {
            format!(
                "NLTK data missing under '{}'; install the stopwords and wordnet corpora",
                config.nltk_data.display()
            )
        })?;

    // No degraded mode: without all three artifacts the service does not start.
    let engine = InferenceEngine::load(&config.model_dir)
        .inspect_err(|e| error!("Refusing to start: {e}"))
        .with_context(|| {
            format!(
                "Model artifacts under '{}' could not be loaded",
                config.model_dir.display()
            )
        })?;

    let state = AppState {
        engine: Arc::new(engine),
        resources: Arc::new(resources),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
