//! HTTP surface for the console
//!
//! One server-rendered page plus two form actions. Every `GET /` is a full
//! top-to-bottom re-evaluation: snapshot the session, re-derive artifact
//! paths from the latest metadata, re-fetch all three artifacts, render.
//! `POST /run` blocks for the whole agent round trip, then redirects back
//! to the page; a submission gate keeps one round trip in flight at most.
//!
//! ## Endpoint Map
//!
//! | Route          | Method | Description                          |
//! |----------------|--------|--------------------------------------|
//! | `/`            | GET    | Console page (`?prompt=` prefills)   |
//! | `/run`         | POST   | Submit a task to the agent backend   |
//! | `/reset`       | POST   | Start a new conversation             |
//! | `/health`      | GET    | Liveness probe                       |

use crate::agent::AgentClient;
use crate::artifacts;
use crate::config::StudioConfig;
use crate::error::Result;
use crate::preview::Previewer;
use crate::render::{PageModel, PreviewView, Renderer, STARTER_PROMPTS};
use crate::session::{Role, SessionStore};
use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state passed into every handler
#[derive(Clone)]
pub struct AppState {
    config: StudioConfig,
    sessions: SessionStore,
    agent: AgentClient,
    previewer: Previewer,
    renderer: Arc<Renderer>,
    /// Serializes submissions: one user action is fully processed before
    /// the next is accepted.
    submit_gate: Arc<Mutex<()>>,
}

impl AppState {
    /// Build the application state from configuration
    pub fn new(config: StudioConfig) -> Result<Self> {
        Ok(Self {
            agent: AgentClient::new(config.backend.clone()),
            previewer: Previewer::new(config.backend.clone()),
            renderer: Arc::new(Renderer::new()?),
            sessions: SessionStore::new(),
            submit_gate: Arc::new(Mutex::new(())),
            config,
        })
    }

    /// Session store handle (exposed for tests and embedding)
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}

/// Build the axum router with all console routes
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    Router::new()
        .route("/", get(show_page))
        .route("/run", post(run_agent))
        .route("/reset", post(reset_conversation))
        .route("/health", get(health_check))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the console server (blocks until ctrl-c)
pub async fn start_server(config: StudioConfig) -> Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config)?;
    let app = build_router(state);

    tracing::info!("Content Studio listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;
    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    /// Starter-button quick fill for the task box
    #[serde(default)]
    prompt: Option<String>,
}

/// Render the console page from scratch
async fn show_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> axum::response::Response {
    let session = state.sessions.snapshot().await;

    // Preview is driven entirely by the most recent assistant metadata;
    // nothing is cached between renders.
    let preview = match session.latest_metadata() {
        None => PreviewView::NoRuns,
        Some(meta) => match artifacts::resolve(meta) {
            None => PreviewView::MissingMeta,
            Some(paths) => PreviewView::ready(state.previewer.preview(&paths).await),
        },
    };

    let model = PageModel {
        backend_url: state.config.backend.display_url(),
        thread_id: session.id.clone(),
        prefill: query.prompt.unwrap_or_default(),
        starters: STARTER_PROMPTS.to_vec(),
        transcript: PageModel::transcript_from(&session),
        preview,
    };

    match state.renderer.render_page(&model) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Page render failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "render failed").into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
struct RunForm {
    #[serde(default)]
    task: String,
}

/// Submit a task: one user turn, one agent round trip, one assistant turn.
async fn run_agent(State(state): State<AppState>, Form(form): Form<RunForm>) -> Redirect {
    if form.task.trim().is_empty() {
        return Redirect::to("/");
    }

    let _gate = state.submit_gate.lock().await;

    // Thread id is read once up front. If the conversation is reset while
    // this call is in flight, the turns below land on the new transcript;
    // that inconsistency is accepted rather than cancelling the call.
    let thread_id = state.sessions.thread_id().await;
    state
        .sessions
        .append_turn(Role::User, form.task.clone(), None)
        .await;

    match state.agent.submit(&thread_id, &form.task).await {
        Ok(reply) => {
            let text = reply.assistant_text();
            state
                .sessions
                .append_turn(Role::Assistant, text, Some(reply))
                .await;
        }
        Err(e) => {
            tracing::warn!(%thread_id, "Agent call failed: {}", e);
            state
                .sessions
                .append_turn(Role::Assistant, format!("Error calling backend: {}", e), None)
                .await;
        }
    }

    Redirect::to("/")
}

/// Start a new conversation: fresh thread id, empty transcript.
async fn reset_conversation(State(state): State<AppState>) -> Redirect {
    state.sessions.reset().await;
    Redirect::to("/")
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
