use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use human_assessment::assessment::{assessment_router, AssessmentService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_assessment_routes(service: Arc<AssessmentService>) -> axum::Router {
    assessment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use human_assessment::assessment::narrative::UnconfiguredProvider;
    use human_assessment::assessment::NarrativeService;
    use human_assessment::config::{BusinessProfile, NarrativeConfig};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(handle),
        };
        let business = BusinessProfile::default();
        let narrator = NarrativeService::new(
            Arc::new(UnconfiguredProvider),
            &NarrativeConfig::default(),
            business.contact_email.as_str(),
        );
        let service = AssessmentService::new(narrator, business);

        with_assessment_routes(Arc::new(service)).layer(Extension(state))
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = get(app(false), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"ok\""));
    }

    #[tokio::test]
    async fn readiness_tracks_startup_flag() {
        let (status, body) = get(app(false), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains("initializing"));

        let (status, _) = get(app(true), "/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_render_as_text() {
        let (status, _) = get(app(true), "/metrics").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn assessment_routes_are_mounted() {
        let (status, body) = get(app(true), "/api/v1/questionnaire").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Financial Intelligence"));
    }
}
