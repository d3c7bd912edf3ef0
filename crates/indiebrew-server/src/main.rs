mod api;
mod middleware;
mod source;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use indiebrew_core::ClassifierLists;
use indiebrew_ranker::Assembler;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState, SearchDefaults},
    middleware::RateLimitState,
    source::SnapshotPlaceSource,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = indiebrew_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let lists = match &config.lists_path {
        Some(path) => {
            let lists = indiebrew_core::load_lists(path)?;
            tracing::info!(path = %path.display(), chains = lists.chains.len(), "loaded classifier lists");
            lists
        }
        None => ClassifierLists::default(),
    };

    let source = SnapshotPlaceSource::from_path(&config.places_path).with_context(|| {
        format!(
            "failed to load places snapshot from {}",
            config.places_path.display()
        )
    })?;
    tracing::info!(
        path = %config.places_path.display(),
        places = source.len(),
        "loaded places snapshot"
    );

    let state = AppState {
        source: Arc::new(source),
        assembler: Arc::new(Assembler::new(&lists)),
        defaults: SearchDefaults::from_config(&config),
    };
    let rate_limit = config.rate_limit.as_ref().map(RateLimitState::from_config);
    if rate_limit.is_none() {
        tracing::info!("rate limiting disabled");
    }
    let app = build_app(state, rate_limit);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "indiebrew server listening");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
