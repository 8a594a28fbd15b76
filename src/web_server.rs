use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router, serve,
};
use minijinja::{path_loader, Environment};
use minijinja_autoreload::AutoReloader;
use serde::{Deserialize, Serialize};
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info};

use crate::chat::{ChatBridge, EXAMPLE_PROMPTS};
use crate::constants::RESTAURANT_NAME;
use crate::menu::{self, MenuItem};
use crate::order;

/// Body of `POST /order`.
#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Body of `POST /chat`. History pairs come from the page as
/// `[user, assistant]` arrays; the assistant half may be null.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<(String, Option<String>)>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

// Shared application state
#[derive(Clone)]
pub struct AppState {
    templates: Arc<AutoReloader>,
    chat: Arc<ChatBridge>,
}

impl AppState {
    pub fn new(templates_dir: impl Into<PathBuf>, chat: ChatBridge) -> Self {
        Self {
            templates: Arc::new(create_minijinja_env(templates_dir.into())),
            chat: Arc::new(chat),
        }
    }
}

// Minijinja Environment setup, reloading when files under `dir` change
fn create_minijinja_env(dir: PathBuf) -> AutoReloader {
    AutoReloader::new(move |notifier| {
        let mut env = Environment::new();
        env.set_loader(path_loader(dir.clone()));
        notifier.watch_path(dir.as_path(), true);
        Ok(env)
    })
}

async fn index_handler(State(state): State<AppState>) -> Result<Html<String>, Response> {
    state
        .templates
        .acquire_env()
        .and_then(|env| {
            env.get_template("index.html").and_then(|tmpl| {
                let context = minijinja::context! {
                    title => RESTAURANT_NAME,
                    options => menu::option_labels(),
                    menu_text => menu::MENU_TEXT.as_str(),
                    examples => EXAMPLE_PROMPTS,
                };
                tmpl.render(context)
            })
        })
        .map(Html)
        .map_err(|e| {
            error!("Failed to get or render template: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("Internal Server Error: {}", e)),
            )
                .into_response()
        })
}

async fn menu_handler() -> Json<&'static [MenuItem]> {
    Json(menu::list_items())
}

async fn order_handler(Json(request): Json<OrderRequest>) -> Html<String> {
    Html(order::place_order(&request.items, request.name.as_deref()))
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let history: Vec<(String, String)> = request
        .history
        .into_iter()
        .map(|(user, assistant)| (user, assistant.unwrap_or_default()))
        .collect();
    let reply = state.chat.reply(&request.message, &history).await;
    Json(ChatResponse { reply })
}

/// The application router. Static assets are served from `static_dir`.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    let static_files_service = ServeDir::new(static_dir).not_found_service(tower::service_fn(
        |_req: axum::extract::Request| async {
            Ok::<_, std::convert::Infallible>((StatusCode::NOT_FOUND, "Not Found").into_response())
        },
    ));

    Router::new()
        .route("/", get(index_handler))
        .route("/menu", get(menu_handler))
        .route("/order", post(order_handler))
        .route("/chat", post(chat_handler))
        .nest_service("/static", static_files_service)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn start_web_server(port: u16, state: AppState, static_dir: &Path) -> Result<()> {
    let app = router(state, static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind to address {}", addr))?;

    serve(listener, app.into_make_service())
        .await
        .context("Web server failed")?;

    Ok(())
}
