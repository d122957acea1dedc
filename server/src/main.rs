use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

mod catalog;
mod error;
mod handlers;
mod render;
mod sessions;
mod state;
mod storage;
mod watchlist;

use crate::catalog::Catalog;
use crate::handlers::{
    catalog_page, object_page, remove_all_handler, remove_handler, toggle_handler,
    watchlist_page, OBJECT_ROUTE, REMOVE_ALL_URL, REMOVE_URL, TOGGLE_URL, WATCHLIST_URL,
};
use crate::state::{AppState, DEFAULT_SESSION_LIMIT};
use crate::storage::{FileStorage, MemoryStorage, Storage};

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
    /// Directory served under /static (stylesheet and the compiled client in pkg/).
    #[arg(long, env = "WATCHLIST_PUBLIC_DIR")]
    public_dir: Option<PathBuf>,
    /// Keep watchlists as JSON files here instead of in memory.
    #[arg(long, env = "WATCHLIST_DATA_DIR")]
    data_dir: Option<PathBuf>,
    /// JSON catalog of watchable models; the demo catalog is used when unset.
    #[arg(long, env = "WATCHLIST_CATALOG")]
    catalog: Option<PathBuf>,
    /// Sessions kept in memory; the least recently used one is dropped beyond this.
    #[arg(long, env = "WATCHLIST_MAX_SESSIONS", default_value_t = DEFAULT_SESSION_LIMIT)]
    max_sessions: usize,
}

fn router(state: AppState, public_dir: PathBuf) -> Router {
    Router::new()
        .route("/", get(catalog_page))
        .route(WATCHLIST_URL, get(watchlist_page))
        .route(OBJECT_ROUTE, get(object_page))
        .route(TOGGLE_URL, post(toggle_handler))
        .route(REMOVE_URL, post(remove_handler))
        .route(REMOVE_ALL_URL, post(remove_all_handler))
        .nest_service("/static", ServeDir::new(public_dir))
        .with_state(state)
}

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let storage: Arc<dyn Storage> = match args.data_dir {
        Some(data_dir) => {
            if let Err(error) = tokio::fs::create_dir_all(&data_dir).await {
                warn!("Failed to create data dir {}: {error}", data_dir.display());
            }
            info!("Storing watchlists in {}", data_dir.display());
            Arc::new(FileStorage::new(data_dir))
        }
        None => {
            info!("Storing watchlists in memory");
            Arc::new(MemoryStorage::default())
        }
    };

    let catalog = match args.catalog {
        Some(path) => match Catalog::load(&path).await {
            Ok(catalog) => catalog,
            Err(err) => {
                error!("Cannot start with catalog {}: {err}", path.display());
                return;
            }
        },
        None => Catalog::demo(),
    };
    info!("Catalog has {} models", catalog.models().len());

    let public_dir = args
        .public_dir
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../public"));
    let state = AppState::new(storage, catalog).with_session_limit(args.max_sessions);
    let app = router(state, public_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Watchlist running at http://localhost:{}", args.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server");
    axum::serve(listener, app).await.expect("Server crashed");
}
