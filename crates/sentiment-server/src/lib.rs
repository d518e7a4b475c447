pub mod charts;
pub mod page;
pub mod routes;
pub mod state;

use axum::Router;
use sentiment_core::config::AppConfig;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the axum Router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = state.config.server.cors;

    let mut app = Router::new()
        .merge(routes::page_routes())
        .merge(routes::api_routes())
        .merge(routes::health_routes())
        .with_state(state);

    app = app.layer(TraceLayer::new_for_http());

    if cors {
        app = app.layer(CorsLayer::permissive());
    }

    app
}

/// Start the HTTP server.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let state = AppState::new(config.clone())?;
    tracing::info!(scorer = state.analyzer.scorer_name(), "Analyzer ready");
    let router = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, Response, StatusCode};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(AppConfig::default()).expect("Failed to create test app state")
    }

    async fn body_string(resp: Response<Body>) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Session id handed out in the response's Set-Cookie header.
    fn cookie_of(resp: &Response<Body>) -> String {
        let value = resp
            .headers()
            .get(header::SET_COOKIE)
            .expect("session cookie")
            .to_str()
            .unwrap();
        value.split(';').next().unwrap().to_string()
    }

    fn analyze_request(cookie: Option<&str>, text: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header("content-type", "application/json");
        if let Some(c) = cookie {
            builder = builder.header("cookie", c);
        }
        builder
            .body(Body::from(serde_json::json!({ "text": text }).to_string()))
            .unwrap()
    }

    fn get_request(uri: &str, cookie: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header("cookie", cookie)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state());

        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["scorer"], "lexicon");
    }

    #[tokio::test]
    async fn test_index_sets_session_cookie() {
        let app = build_router(test_state());

        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(cookie_of(&resp).starts_with("sentiment_session="));
        let html = body_string(resp).await;
        assert!(html.contains("Sentiment Analyzer Pro"));
        assert!(html.contains("No analyses yet"));
    }

    #[tokio::test]
    async fn test_api_analyze_appends_to_session() {
        let app = build_router(test_state());

        let resp = app
            .clone()
            .oneshot(analyze_request(None, "What a wonderful day"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = cookie_of(&resp);
        let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(body["record"]["sentiment"], "Positive");
        assert_eq!(body["metrics"]["word_count"], 4);

        app.clone()
            .oneshot(analyze_request(Some(&cookie), "This is awful"))
            .await
            .unwrap();

        let resp = app
            .oneshot(get_request("/api/history", &cookie))
            .await
            .unwrap();
        let history: Vec<serde_json::Value> =
            serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1]["sentiment"], "Negative");
    }

    #[tokio::test]
    async fn test_empty_text_is_skipped() {
        let app = build_router(test_state());

        let resp = app
            .clone()
            .oneshot(analyze_request(None, "   "))
            .await
            .unwrap();
        let cookie = cookie_of(&resp);
        let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert!(body["record"].is_null());

        let resp = app
            .oneshot(get_request("/api/summary", &cookie))
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(body["summary"]["total"], 0);
        assert!(body["summary"]["avg_polarity"].is_null());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated_by_cookie() {
        let app = build_router(test_state());

        let resp = app
            .clone()
            .oneshot(analyze_request(None, "good"))
            .await
            .unwrap();
        let first = cookie_of(&resp);

        let resp = app
            .clone()
            .oneshot(analyze_request(None, "bad"))
            .await
            .unwrap();
        let second = cookie_of(&resp);
        assert_ne!(first, second);

        let resp = app
            .oneshot(get_request("/api/summary", &first))
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(body["summary"]["total"], 1);
        assert_eq!(body["summary"]["positive"], 1);
        assert_eq!(body["summary"]["negative"], 0);
    }

    #[tokio::test]
    async fn test_form_analyze_renders_result() {
        let app = build_router(test_state());

        let req = Request::builder()
            .method("POST")
            .uri("/analyze")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("text=I+love+this+%3Cb%3E"))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_string(resp).await;
        assert!(html.contains(r#"class="result-card""#));
        assert!(html.contains("Sentiment: <strong>Positive</strong>"));
        assert!(html.contains("I love this &lt;b&gt;"));
        assert!(html.contains("Total Analyses"));
    }

    fn form_request(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded");
        if let Some(c) = cookie {
            builder = builder.header("cookie", c);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_form_blank_text_renders_no_result() {
        let app = build_router(test_state());

        let resp = app
            .clone()
            .oneshot(form_request("/analyze", None, "text=+++"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = cookie_of(&resp);
        let html = body_string(resp).await;
        assert!(!html.contains(r#"class="result-card""#));
        assert!(html.contains("No analyses yet"));

        let resp = app
            .oneshot(get_request("/api/history", &cookie))
            .await
            .unwrap();
        let history: Vec<serde_json::Value> =
            serde_json::from_str(&body_string(resp).await).unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_details_toggle_shows_current_result() {
        let app = build_router(test_state());

        let resp = app
            .clone()
            .oneshot(form_request("/analyze", None, "text=I+love+this"))
            .await
            .unwrap();
        let cookie = cookie_of(&resp);
        assert!(!body_string(resp).await.contains("Word Count"));

        let resp = app
            .clone()
            .oneshot(form_request("/details", Some(&cookie), "show=on"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let html = body_string(app.clone().oneshot(get_request("/", &cookie)).await.unwrap()).await;
        assert!(html.contains(r#"class="result-card""#));
        assert!(html.contains("Word Count"));
        assert!(html.contains("Interpretation"));
        assert!(html.contains(" checked"));

        // Unticking keeps the result card but hides the details.
        app.clone()
            .oneshot(form_request("/details", Some(&cookie), ""))
            .await
            .unwrap();
        let html = body_string(app.clone().oneshot(get_request("/", &cookie)).await.unwrap()).await;
        assert!(html.contains(r#"class="result-card""#));
        assert!(!html.contains("Word Count"));

        // Clearing drops the result card along with the history.
        app.clone()
            .oneshot(form_request("/clear", Some(&cookie), ""))
            .await
            .unwrap();
        let html = body_string(app.oneshot(get_request("/", &cookie)).await.unwrap()).await;
        assert!(!html.contains(r#"class="result-card""#));
    }

    #[tokio::test]
    async fn test_details_toggle_and_clear_redirect() {
        let app = build_router(test_state());

        let resp = app
            .clone()
            .oneshot(analyze_request(None, "nice"))
            .await
            .unwrap();
        let cookie = cookie_of(&resp);

        let req = Request::builder()
            .method("POST")
            .uri("/details")
            .header("content-type", "application/x-www-form-urlencoded")
            .header("cookie", &cookie)
            .body(Body::from("show=on"))
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "/");

        let req = Request::builder()
            .method("POST")
            .uri("/analyze")
            .header("content-type", "application/x-www-form-urlencoded")
            .header("cookie", &cookie)
            .body(Body::from("text=nice"))
            .unwrap();
        let html = body_string(app.clone().oneshot(req).await.unwrap()).await;
        assert!(html.contains("Interpretation"));

        let req = Request::builder()
            .method("POST")
            .uri("/clear")
            .header("cookie", &cookie)
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let resp = app
            .oneshot(get_request("/api/history", &cookie))
            .await
            .unwrap();
        let history: Vec<serde_json::Value> =
            serde_json::from_str(&body_string(resp).await).unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_export_csv() {
        let app = build_router(test_state());

        let resp = app
            .clone()
            .oneshot(analyze_request(None, "great, \"really\" great"))
            .await
            .unwrap();
        let cookie = cookie_of(&resp);

        let resp = app
            .oneshot(get_request("/export.csv", &cookie))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            resp.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"sentiment_analysis_history.csv\""
        );

        let csv = body_string(resp).await;
        let records = sentiment_analytics::from_csv(&csv).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "great, \"really\" great");
        assert!(csv.starts_with("text,sentiment,polarity,subjectivity,timestamp,emoji"));
    }

    #[tokio::test]
    async fn test_api_clear() {
        let app = build_router(test_state());

        let resp = app
            .clone()
            .oneshot(analyze_request(None, "fine"))
            .await
            .unwrap();
        let cookie = cookie_of(&resp);

        let req = Request::builder()
            .method("DELETE")
            .uri("/api/history")
            .header("cookie", &cookie)
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(body["cleared"], 1);
    }
}
