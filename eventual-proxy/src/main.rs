use std::{env, io, process, sync::Arc};

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod cache;
mod cli;
mod server;
mod source;

use cli::SourceArg;
use server::AppState;
use source::EventSource;

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = cli::parse(&env::args().skip(1).collect::<Vec<_>>());

    setup_logging();

    let source = match &args.source {
        SourceArg::File(path) => match EventSource::load_file(path).await {
            Ok(source) => source,
            Err(err) => {
                tracing::error!(%err, path = %path.display(), "cannot load events");
                process::exit(1);
            }
        },
        SourceArg::Url(url) => EventSource::upstream(url.as_str()),
    };

    let cache = cache::Cache::new(cache::Config {
        enabled: args.enable_cache,
        ttl: args.cache_ttl,
        capacity: args.cache_capacity,
    });

    let router = server::router(AppState {
        source: Arc::new(source),
        cache,
        layout: args.layout,
    });

    let listener = TcpListener::bind(args.address).await?;
    tracing::info!("Listening at http://{}{}", args.address, server::MONTH_PATH);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}
