//! HTTP surface: routing and request handlers.
//!
//! Seven routes, all thin glue over the preset engine: static landing
//! and editor documents, asset streaming, preset read/save, and the two
//! compilation paths (persisted compile and stateless generate). Each
//! request re-resolves from stored source; nothing is cached between
//! requests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use fresco_css::{GenerateError, generate};
use fresco_preset::Preset;

use crate::error::{Error, Result};
use crate::storage::PresetStore;

type SharedStore = Arc<PresetStore>;

async fn landing() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

async fn editor() -> Html<&'static str> {
    Html(include_str!("../assets/editor.html"))
}

fn error_body(message: impl Into<String>) -> Json<Value> {
    Json(json!({ "error": message.into() }))
}

fn not_found_response() -> Response {
    (StatusCode::NOT_FOUND, error_body("Not found")).into_response()
}

async fn not_found() -> Response {
    not_found_response()
}

fn internal_error(context: &str, error: &Error) -> Response {
    warn!(%error, "{}", context);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_body(error.to_string()),
    )
        .into_response()
}

/// Streams a previously compiled asset, cache disabled.
async fn read_asset(State(store): State<SharedStore>, Path(path): Path<String>) -> Response {
    match store.read_asset(&path) {
        Ok(Some(bytes)) => (
            [
                (header::CONTENT_TYPE, asset_content_type(&path)),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            bytes,
        )
            .into_response(),
        Ok(None) => not_found_response(),
        Err(error) => internal_error("failed to read asset", &error),
    }
}

fn asset_content_type(path: &str) -> &'static str {
    if path.ends_with(".css") {
        "text/css"
    } else if path.ends_with(".mjs") || path.ends_with(".js") {
        "text/javascript"
    } else {
        "application/octet-stream"
    }
}

/// Returns a stored preset's raw text.
async fn read_preset(State(store): State<SharedStore>, Path(name): Path<String>) -> Response {
    match store.read_preset(&name) {
        Ok(Some(text)) => text.into_response(),
        Ok(None) => not_found_response(),
        Err(error) => internal_error("failed to read preset", &error),
    }
}

/// Validates and persists a preset document verbatim.
async fn save_preset(
    State(store): State<SharedStore>,
    Path(name): Path<String>,
    body: String,
) -> Response {
    let name = PresetStore::sanitize(&name);
    if name.is_empty() || body.is_empty() {
        warn!(preset = %name, "rejected save with missing name or input");
        return (
            StatusCode::BAD_REQUEST,
            error_body("Missing name or input.\nPOST /preset/:name"),
        )
            .into_response();
    }

    if let Err(error) = Preset::from_yaml(&body) {
        warn!(preset = %name, %error, "rejected unparseable preset");
        return (StatusCode::BAD_REQUEST, error_body(error.to_string())).into_response();
    }

    match store.save_preset(&name, &body) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(error) => internal_error("failed to save preset", &error),
    }
}

/// Loads a stored preset, resolves and compiles it, and persists the
/// compiled asset pair.
async fn compile_preset(State(store): State<SharedStore>, Path(name): Path<String>) -> Response {
    let name = PresetStore::sanitize(&name);
    let text = match store.read_preset(&name) {
        Ok(Some(text)) => text,
        Ok(None) => return not_found_response(),
        Err(error) => return internal_error("failed to read preset", &error),
    };
    let preset = match Preset::from_yaml(&text) {
        Ok(preset) => preset,
        Err(error) => {
            warn!(preset = %name, %error, "stored preset no longer parses");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body(error.to_string()),
            )
                .into_response();
        }
    };

    info!(preset = %name, "compiling preset");
    let start = Instant::now();

    match generate(&preset, Some(&name), store.as_ref()) {
        Ok(output) => {
            if let Err(error) = store.save_assets(&name, &output) {
                return internal_error("failed to save compiled assets", &error);
            }
            info!(
                preset = %name,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "finished compiling"
            );
            Json(json!({ "json": parse_config(&output.json) })).into_response()
        }
        Err(GenerateError::Compile { error, json }) => {
            warn!(preset = %name, message = %error.message, "compile failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": error.to_string(),
                    "source": error.template,
                    "json": parse_config(&json),
                })),
            )
                .into_response()
        }
        Err(error) => {
            warn!(preset = %name, %error, "resolution failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body(error.to_string()),
            )
                .into_response()
        }
    }
}

/// Resolves and compiles an inline preset body without persisting
/// anything. The body is auto-detected as JSON or YAML notation.
async fn generate_preset(State(store): State<SharedStore>, body: String) -> Response {
    let preset = match Preset::parse(&body) {
        Ok(preset) => preset,
        Err(error) => {
            warn!(%error, "rejected unparseable generate body");
            return (StatusCode::BAD_REQUEST, error_body(error.to_string())).into_response();
        }
    };

    match generate(&preset, None, store.as_ref()) {
        Ok(output) => {
            let payload = json!({ "error": null, "css": output.css, "json": output.json });
            pretty_json(StatusCode::OK, &payload)
        }
        Err(GenerateError::Compile { error, json }) => {
            warn!(message = %error.message, "generate compile failed");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": error.to_string(), "json": json })),
            )
                .into_response()
        }
        Err(error) => {
            warn!(%error, "generate resolution failed");
            (StatusCode::BAD_REQUEST, error_body(error.to_string())).into_response()
        }
    }
}

/// The serialized configuration re-parsed for inlining into a response.
fn parse_config(json: &str) -> Value {
    serde_json::from_str(json).unwrap_or(Value::Null)
}

fn pretty_json(status: StatusCode, body: &Value) -> Response {
    let text = serde_json::to_string_pretty(body).unwrap_or_default();
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        text,
    )
        .into_response()
}

/// Build the axum router.
pub fn build_router(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/edit", get(editor))
        .route("/assets/{*path}", get(read_asset))
        .route("/compile/{name}", post(compile_preset))
        .route("/preset/{name}", get(read_preset).post(save_preset))
        .route("/generate", post(generate_preset))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Run the server on loopback at `port`. Blocks until shutdown.
pub async fn run_server(store: PresetStore, port: u16) -> Result<()> {
    let router = build_router(Arc::new(store));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "fresco server listening");

    axum::serve(listener, router)
        .await
        .map_err(|error| Error::Server(error.to_string()))?;

    Ok(())
}
