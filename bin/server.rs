// 🌐 Chore Tracker - Web Server
// JSON API plus a small embedded web UI over the shared in-memory store

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use clap::Parser;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chore_tracker::{
    aggregate_all_children, completions_for_child, reconcile, reconcile_summary, week_cutoff,
    Chore, ChoreStore, ParentRoster, Role, TrackerError,
};

/// Household chore tracker - HTTP API server
#[derive(Parser, Debug)]
#[command(
    name = "chore-server",
    version,
    about = "Serve the chore tracker API and web UI"
)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0:3000")]
    addr: String,

    /// Comma-separated names treated as parents (everyone else is a child)
    #[arg(long, value_delimiter = ',', default_value = "aaron,janet")]
    parents: Vec<String>,

    /// Directory served under /static
    #[arg(long, default_value = "web")]
    static_dir: String,
}

/// Shared application state - one store behind one coarse lock
#[derive(Clone)]
struct AppState {
    store: Arc<Mutex<ChoreStore>>,
}

// ============================================================================
// Request / response shapes
// ============================================================================

#[derive(Deserialize)]
struct LoginRequest {
    name: Option<String>,
}

#[derive(Serialize)]
struct LoginResponse {
    name: String,
    role: Role,
    balance: f64,
}

#[derive(Deserialize)]
struct CreateChoreRequest {
    name: Option<String>,
    timing: Option<String>,
    price: Option<Value>,
    emoji: Option<String>,
    required: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReconcileRequest {
    child_name: Option<String>,
    amount: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompleteRequest {
    chore_id: Option<Value>,
}

#[derive(Serialize)]
struct CompleteResponse {
    message: String,
    chore: Chore,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Validation failures reject with 400, missing references with 404.
fn tracker_error_response(err: TrackerError) -> Response {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_REQUEST
    };
    error_response(status, err.to_string())
}

/// Accept a JSON number or a numeric string, the way the web form submits.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Coerce a body field to a chore id. Anything non-coercible maps to id 0,
/// which is never cataloged, so the lookup reports not-found.
fn coerce_chore_id(value: Option<&Value>) -> u32 {
    value
        .and_then(numeric)
        .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= u32::MAX as f64)
        .map(|f| f as u32)
        .unwrap_or(0)
}

// ============================================================================
// API Handlers
// ============================================================================

/// POST /api/login - look up or create the user for a name
async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    let name = req.name.unwrap_or_default();
    let name = name.trim();
    if name.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Name is required");
    }

    let mut store = state.store.lock().unwrap();
    let user = store.ensure_user(name);
    Json(LoginResponse {
        name: user.name.clone(),
        role: user.role,
        balance: user.balance,
    })
    .into_response()
}

/// GET /api/chores - the catalog in insertion order
async fn get_chores(State(state): State<AppState>) -> Response {
    let store = state.store.lock().unwrap();
    Json(store.chores().to_vec()).into_response()
}

/// POST /api/chores - create a chore (parent action)
async fn post_chore(State(state): State<AppState>, Json(req): Json<CreateChoreRequest>) -> Response {
    let (name, timing, price) = match (&req.name, &req.timing, &req.price) {
        (Some(name), Some(timing), Some(price)) if !name.is_empty() && !timing.is_empty() => {
            (name.as_str(), timing.as_str(), numeric(price).unwrap_or(f64::NAN))
        }
        _ => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "name, timing and price are required",
            )
        }
    };
    let emoji = req.emoji.unwrap_or_default();
    let required = req.required.unwrap_or(false);

    let mut store = state.store.lock().unwrap();
    match store.create_chore(name, timing, price, &emoji, required) {
        Ok(chore) => (StatusCode::CREATED, Json(chore)).into_response(),
        Err(err) => tracker_error_response(err),
    }
}

/// GET /api/report - every child's priced activity for the last week
async fn get_report(State(state): State<AppState>) -> Response {
    let store = state.store.lock().unwrap();
    Json(aggregate_all_children(&store, week_cutoff(Utc::now()))).into_response()
}

/// GET /api/reconcile-summary - earned vs balance per child
async fn get_reconcile_summary(State(state): State<AppState>) -> Response {
    let store = state.store.lock().unwrap();
    Json(reconcile_summary(&store, week_cutoff(Utc::now()))).into_response()
}

/// POST /api/reconcile - transfer an amount into a child's balance
async fn post_reconcile(State(state): State<AppState>, Json(req): Json<ReconcileRequest>) -> Response {
    let child_name = match req.child_name {
        Some(name) if !name.is_empty() => name,
        _ => return error_response(StatusCode::BAD_REQUEST, "childName is required"),
    };
    let amount = req.amount.as_ref().and_then(numeric).unwrap_or(f64::NAN);

    let mut store = state.store.lock().unwrap();
    match reconcile(&mut store, &child_name, amount) {
        Ok(receipt) => Json(receipt).into_response(),
        Err(err) => tracker_error_response(err),
    }
}

/// GET /api/child/:name/completions - one user's windowed activity + balance
async fn get_child_completions(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    let store = state.store.lock().unwrap();
    match completions_for_child(&store, &name, week_cutoff(Utc::now())) {
        Ok(view) => Json(view).into_response(),
        Err(err) => tracker_error_response(err),
    }
}

/// POST /api/child/:name/complete - record a completion now
async fn post_child_complete(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<CompleteRequest>,
) -> Response {
    let chore_id = coerce_chore_id(req.chore_id.as_ref());

    let mut store = state.store.lock().unwrap();
    match store.record_completion(&name, chore_id, Utc::now()) {
        Ok(completion) => {
            let chore = store
                .find_chore(completion.chore_id)
                .cloned()
                .expect("completion always references a cataloged chore");
            (
                StatusCode::CREATED,
                Json(CompleteResponse {
                    message: "Chore completion recorded".to_string(),
                    chore,
                }),
            )
                .into_response()
        }
        Err(err) => tracker_error_response(err),
    }
}

/// GET / - Serve the web UI
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chore_server=info,tower_http=info".into()),
        )
        .init();

    let state = AppState {
        store: Arc::new(Mutex::new(ChoreStore::new(ParentRoster::new(
            &args.parents,
        )))),
    };

    let api_routes = Router::new()
        .route("/login", post(login))
        .route("/chores", get(get_chores).post(post_chore))
        .route("/report", get(get_report))
        .route("/reconcile-summary", get(get_reconcile_summary))
        .route("/reconcile", post(post_reconcile))
        .route("/child/:name/completions", get(get_child_completions))
        .route("/child/:name/complete", post(post_child_complete))
        .with_state(state);

    let app = Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new(&args.static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&args.addr)
        .await
        .expect("Failed to bind to address");

    info!("🚀 Chore Tracker running at http://{}", args.addr);
    info!("   API: http://{}/api/chores", args.addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
