use crate::page::{render_page, PageView};
use crate::state::AppState;
use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use sentiment_analytics::{recent_entries, to_csv, trend, DistributionSlice, HistorySummary, RecentEntry};
use sentiment_core::{AnalysisRecord, Interpretation, TextMetrics};
use serde::{Deserialize, Serialize};

/// Cookie carrying the visitor's session id.
pub const SESSION_COOKIE: &str = "sentiment_session";

/// Extract the session id from the request's Cookie headers.
pub fn session_id_from(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn session_cookie(id: &str) -> HeaderValue {
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, id
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("sentiment_session=; Path=/"))
}

/// Attach the session cookie to any response.
fn with_session(id: &str, response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(SET_COOKIE, session_cookie(id));
    response
}

// ── Health ──────────────────────────────────────────────────────────────

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "scorer": state.analyzer.scorer_name(),
    }))
}

// ── Page ────────────────────────────────────────────────────────────────

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze_form))
        .route("/details", post(toggle_details))
        .route("/clear", post(clear_form))
        .route("/export.csv", get(export_csv))
}

async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_or_create(session_id_from(&headers).as_deref());
    let html = render_page(&PageView {
        records: session.history.records(),
        result: session.current_result(),
        show_details: session.show_details,
        display: &state.config.display,
    });
    with_session(&session.id, Html(html))
}

#[derive(Debug, Deserialize)]
struct AnalyzeForm {
    #[serde(default)]
    text: String,
}

async fn analyze_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AnalyzeForm>,
) -> Response {
    let record = state.analyzer.analyze(&form.text);

    let mut sessions = state.sessions.write().await;
    let session = sessions.get_or_create(session_id_from(&headers).as_deref());
    session.has_result = record.is_some();
    if let Some(record) = record {
        tracing::info!(session_id = %session.id, sentiment = %record.sentiment, "Recorded analysis");
        session.history.push(record);
    }

    let html = render_page(&PageView {
        records: session.history.records(),
        result: session.current_result(),
        show_details: session.show_details,
        display: &state.config.display,
    });
    with_session(&session.id, Html(html))
}

#[derive(Debug, Deserialize)]
struct DetailsForm {
    show: Option<String>,
}

async fn toggle_details(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<DetailsForm>,
) -> Response {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_or_create(session_id_from(&headers).as_deref());
    session.show_details = form.show.is_some();
    tracing::debug!(session_id = %session.id, show = session.show_details, "Toggled details");
    with_session(&session.id, Redirect::to("/"))
}

async fn clear_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_or_create(session_id_from(&headers).as_deref());
    let cleared = session.history.len();
    session.history.clear();
    session.has_result = false;
    tracing::info!(session_id = %session.id, cleared, "Cleared history");
    with_session(&session.id, Redirect::to("/"))
}

async fn export_csv(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, (StatusCode, String)> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_or_create(session_id_from(&headers).as_deref());
    let csv = to_csv(session.history.records())
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        state.config.export.file_name.replace('"', "")
    );
    let mut response = with_session(&session.id, csv);
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/csv; charset=utf-8"));
    headers.insert(
        CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?,
    );
    Ok(response)
}

// ── JSON API ────────────────────────────────────────────────────────────

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/analyze", post(api_analyze))
        .route("/api/history", get(api_history).delete(api_clear))
        .route("/api/summary", get(api_summary))
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    record: Option<AnalysisRecord>,
    metrics: Option<TextMetrics>,
    interpretation: Option<Interpretation>,
}

async fn api_analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<AnalyzeRequest>,
) -> Response {
    let record = state.analyzer.analyze(&req.text);

    let mut sessions = state.sessions.write().await;
    let session = sessions.get_or_create(session_id_from(&headers).as_deref());

    let body = match record {
        Some(record) => {
            session.history.push(record.clone());
            AnalyzeResponse {
                metrics: Some(record.metrics()),
                interpretation: Some(Interpretation::of(&record)),
                record: Some(record),
            }
        }
        None => AnalyzeResponse {
            record: None,
            metrics: None,
            interpretation: None,
        },
    };
    with_session(&session.id, Json(body))
}

async fn api_history(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_or_create(session_id_from(&headers).as_deref());
    with_session(&session.id, Json(session.history.clone()))
}

async fn api_clear(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_or_create(session_id_from(&headers).as_deref());
    let cleared = session.history.len();
    session.history.clear();
    session.has_result = false;
    with_session(&session.id, Json(serde_json::json!({ "cleared": cleared })))
}

#[derive(Debug, Serialize)]
struct SummaryResponse {
    summary: HistorySummary,
    distribution: Vec<DistributionSlice>,
    trend: Vec<f64>,
    recent: Vec<RecentEntry>,
}

async fn api_summary(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_or_create(session_id_from(&headers).as_deref());
    let records = session.history.records();
    let summary = HistorySummary::from_records(records);
    let body = SummaryResponse {
        distribution: summary.distribution(),
        summary,
        trend: trend(records),
        recent: recent_entries(
            records,
            state.config.display.recent_limit,
            state.config.display.preview_chars,
        ),
    };
    with_session(&session.id, Json(body))
}
