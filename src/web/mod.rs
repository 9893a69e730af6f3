// Web server: Axum-based single-page toxicity dashboard.
//
// The dashboard page is embedded at compile time via include_dir!.
// All /api/* routes serve JSON; all other paths serve the page's assets,
// falling back to index.html.
//
// One analysis at a time: the busy lock is held for the whole model
// round-trip, and a second request while it's held gets 409.
//
// No CORS layer. The page is served from the same origin as the API, and
// other sites must not be able to read analyses or spend the API quota.

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use include_dir::{include_dir, Dir};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::toxicity::traits::CompletionModel;

pub mod handlers;

// Embed the dashboard page at compile time.
static ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/web/static");

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn CompletionModel>,
    /// Held for the duration of an analysis
    pub busy: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self {
            model,
            busy: Arc::new(Mutex::new(())),
        }
    }
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(model: Arc<dyn CompletionModel>, port: u16, bind: &str) -> Result<()> {
    let app = build_router(AppState::new(model));

    let addr = format!("{bind}:{port}");
    info!("toxmeter dashboard listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/api/status", get(handlers::status::get_status))
        .route("/api/analyze", post(handlers::analyze::analyze_text));

    Router::new()
        .merge(api)
        .fallback(serve_page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check: always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Serve the embedded dashboard. Anything that isn't a known asset gets
/// index.html.
async fn serve_page(uri: Uri) -> Response {
    let requested = uri.path().trim_start_matches('/');
    let (name, file) = match ASSETS.get_file(requested) {
        Some(file) => (requested, file),
        None => match ASSETS.get_file("index.html") {
            Some(index) => ("index.html", index),
            None => {
                return (
                    StatusCode::SERVICE_UNAVAILABLE,
                    [(header::CONTENT_TYPE, "text/plain")],
                    "Dashboard assets not found in web/static",
                )
                    .into_response()
            }
        },
    };

    (
        [(header::CONTENT_TYPE, content_type(name))],
        Body::from(file.contents()),
    )
        .into_response()
}

/// Content type for the three embedded assets.
fn content_type(name: &str) -> &'static str {
    if name.ends_with(".js") {
        "application/javascript"
    } else if name.ends_with(".css") {
        "text/css"
    } else {
        "text/html; charset=utf-8"
    }
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, kind: &str, message: &str) -> Response {
    (
        status,
        axum::Json(serde_json::json!({ "error": message, "kind": kind })),
    )
        .into_response()
}
