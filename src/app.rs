use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use crate::category::{CategoryDataset, Level};
use crate::downloader::{self, XLSX_FILENAME, XLSX_MIME};
use crate::sampler::{self, SampleResult};
use crate::session::ExclusionSet;

/// Shared application state for one interactive session.
///
/// The dataset is immutable after startup. The exclusion set and the most
/// recent result live behind one mutex each; actions are serialized, which
/// is the whole concurrency model of this tool.
pub struct AppState {
    dataset: CategoryDataset,
    exclusions: Mutex<ExclusionSet>,
    last_result: Mutex<Option<SampleResult>>,
}

#[derive(Deserialize)]
struct SampleRequest {
    n: i64,
    level: u8,
}

#[derive(Serialize)]
struct SampleResponse {
    columns: Vec<&'static str>,
    rows: Vec<Vec<String>>,
    exhausted: bool,
    available_remaining: usize,
}

#[derive(Serialize)]
struct LevelExclusions {
    level: u8,
    label: &'static str,
    excluded: Vec<String>,
}

#[derive(Serialize)]
struct StatusResponse {
    status: String,
    message: Option<String>,
}

impl StatusResponse {
    fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
        }
    }
}

pub async fn run(dataset: CategoryDataset, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    // Setup app state
    let app_state = Arc::new(AppState {
        dataset,
        exclusions: Mutex::new(ExclusionSet::new()),
        last_result: Mutex::new(None),
    });

    // Build router
    let app = Router::new()
        .route("/", get(serve_index))
        .route("/api/sample", post(draw_sample))
        .route("/api/reset", post(reset_exclusions))
        .route("/api/exclusions", get(get_exclusions))
        .route("/api/export", get(export_result))
        .with_state(app_state);

    // Start server
    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn draw_sample(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SampleRequest>,
) -> impl IntoResponse {
    let (n, level) = match (
        sampler::validate_count(payload.n),
        Level::from_number(payload.level),
    ) {
        (Ok(n), Ok(level)) => (n, level),
        (Err(e), _) | (_, Err(e)) => {
            log::warn!("Rejected sample request: {}", e);
            return (StatusCode::BAD_REQUEST, Json(StatusResponse::error(e.to_string())))
                .into_response();
        }
    };

    let mut exclusions = state.exclusions.lock().unwrap();
    let result = match sampler::sample(
        &state.dataset,
        n,
        level,
        &exclusions,
        &mut rand::thread_rng(),
    ) {
        Ok(result) => result,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(StatusResponse::error(e.to_string())))
                .into_response();
        }
    };

    if result.is_empty() {
        log::info!(
            "Selection exhausted at level {} (requested {})",
            level.number(),
            n
        );
    } else {
        exclusions.record_selection(&result);
        log::info!(
            "Drew {} value(s) at level {}, {} row(s)",
            n,
            level.number(),
            result.rows().len()
        );
    }
    let available_remaining = state.dataset.available_count(level, &exclusions);

    let response = SampleResponse {
        columns: result.columns().to_vec(),
        rows: result.rows().to_vec(),
        exhausted: result.is_empty(),
        available_remaining,
    };
    *state.last_result.lock().unwrap() = Some(result);

    Json(response).into_response()
}

async fn reset_exclusions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.exclusions.lock().unwrap().reset();
    *state.last_result.lock().unwrap() = None;
    log::info!("Exclusion set cleared");
    Json(StatusResponse::ok())
}

async fn get_exclusions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let exclusions = state.exclusions.lock().unwrap();

    let levels: Vec<LevelExclusions> = Level::ALL
        .into_iter()
        .map(|level| {
            let mut excluded: Vec<String> = exclusions
                .excluded_at(level)
                .map(|values| values.iter().cloned().collect())
                .unwrap_or_default();
            excluded.sort();
            LevelExclusions {
                level: level.number(),
                label: level.header(),
                excluded,
            }
        })
        .collect();

    Json(levels)
}

async fn export_result(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let last_result = state.last_result.lock().unwrap();

    let Some(result) = last_result.as_ref() else {
        return (
            StatusCode::NOT_FOUND,
            Json(StatusResponse::error("No sample has been drawn yet")),
        )
            .into_response();
    };

    match downloader::to_xlsx(result) {
        Ok(buffer) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, XLSX_MIME)
            .header(
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", XLSX_FILENAME),
            )
            .body(axum::body::Body::from(buffer))
            .unwrap(),
        Err(e) => {
            log::error!("XLSX export failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StatusResponse::error(e.to_string())),
            )
                .into_response()
        }
    }
}
