use crate::infra::{AppState, SharedEngine};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use persony::engine::{
    AnalysisWarning, AnalyticsSnapshot, AnswerMap, Dimension, EngineError, Phase,
    QuestionnaireEngine,
};
use persony::error::AppError;
use persony::questions::Question;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct NextQuestionsRequest {
    #[serde(default)]
    pub(crate) answers: AnswerMap,
    #[serde(default)]
    pub(crate) max_questions: Option<usize>,
    #[serde(default = "default_shuffle")]
    pub(crate) shuffle: bool,
}

fn default_shuffle() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswersRequest {
    #[serde(default)]
    pub(crate) answers: AnswerMap,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuestionView {
    pub(crate) key: String,
    pub(crate) dimension: Dimension,
    pub(crate) question: Question,
}

#[derive(Debug, Serialize)]
pub(crate) struct NextQuestionsResponse {
    pub(crate) phase: Phase,
    pub(crate) completed: bool,
    pub(crate) remaining: usize,
    pub(crate) questions: Vec<QuestionView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnalyticsResponse {
    pub(crate) completed: bool,
    pub(crate) warnings: Vec<AnalysisWarning>,
    pub(crate) analytics: Vec<AnalyticsSnapshot>,
}

/// Stateless questionnaire endpoints; every request carries the full answer map.
pub(crate) fn persony_router(engine: SharedEngine) -> Router {
    Router::new()
        .route("/api/v1/persony/next", post(next_questions_endpoint))
        .route("/api/v1/persony/analytics", post(analytics_endpoint))
        .route("/api/v1/persony/result", post(result_endpoint))
        .with_state(engine)
}

pub(crate) fn with_persony_routes(engine: SharedEngine) -> Router {
    persony_router(engine)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
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

pub(crate) async fn next_questions_endpoint(
    State(engine): State<SharedEngine>,
    Json(request): Json<NextQuestionsRequest>,
) -> Response {
    match next_questions(engine.as_ref(), &request) {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

fn next_questions(
    engine: &dyn QuestionnaireEngine,
    request: &NextQuestionsRequest,
) -> Result<NextQuestionsResponse, EngineError> {
    let answers = &request.answers;
    let batch = if request.shuffle {
        let mut rng = rand::thread_rng();
        engine.infer_next_questions_with(answers, request.max_questions, Some(&mut rng))?
    } else {
        engine.infer_next_questions_with(answers, request.max_questions, None)?
    };

    let questions = batch
        .into_iter()
        .map(|entry| QuestionView {
            key: entry.key.clone(),
            dimension: entry.dimension,
            question: entry.question.clone(),
        })
        .collect();

    Ok(NextQuestionsResponse {
        phase: engine.current_phase(answers),
        completed: engine.is_completed(answers),
        remaining: engine.remaining(answers),
        questions,
    })
}

pub(crate) async fn analytics_endpoint(
    State(engine): State<SharedEngine>,
    Json(request): Json<AnswersRequest>,
) -> Json<AnalyticsResponse> {
    let answers = &request.answers;
    let report = engine.analyze(answers);
    Json(AnalyticsResponse {
        completed: engine.is_completed(answers),
        warnings: report.warnings,
        analytics: report.analytics,
    })
}

pub(crate) async fn result_endpoint(
    State(engine): State<SharedEngine>,
    Json(request): Json<AnswersRequest>,
) -> Response {
    let answers = &request.answers;
    if !engine.is_completed(answers) {
        let payload = json!({
            "error": "questionnaire is not completed",
            "phase": engine.current_phase(answers),
            "remaining": engine.remaining(answers),
        });
        return (StatusCode::CONFLICT, Json(payload)).into_response();
    }

    let payload = json!({
        "label": engine.result_label(answers),
        "completed": true,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::simulate;
    use crate::infra::build_engine;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use persony::config::QuestionnaireConfig;
    use persony::engine::EngineName;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn engine() -> SharedEngine {
        build_engine(EngineName::PersonyV1, &QuestionnaireConfig::default()).expect("engine builds")
    }

    fn app(engine: SharedEngine, ready: bool) -> Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_persony_routes(engine).layer(Extension(state))
    }

    async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .expect("router responds");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("body readable");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn next_route_serves_the_first_preference_batch() {
        let (status, body) = post_json(
            app(engine(), true),
            "/api/v1/persony/next",
            json!({ "answers": {}, "shuffle": false }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"], "PREFERENCES");
        assert_eq!(body["completed"], false);
        assert_eq!(body["remaining"], 72);

        let questions = body["questions"].as_array().expect("questions array");
        assert_eq!(questions.len(), 8);
        assert_eq!(questions[0]["key"], "P-IE-01");
        assert!(questions.iter().all(|question| question["dimension"] == "P-IE"));
        assert_eq!(questions[0]["question"]["question"]["type"], "scale");
    }

    #[tokio::test]
    async fn next_route_honors_the_requested_batch_size() {
        let (status, body) = post_json(
            app(engine(), true),
            "/api/v1/persony/next",
            json!({ "answers": { "P-IE-01": 2 }, "max_questions": 3 }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["remaining"], 71);
        let questions = body["questions"].as_array().expect("questions array");
        assert_eq!(questions.len(), 3);
        assert!(questions.iter().all(|question| question["key"] != "P-IE-01"));
    }

    #[tokio::test]
    async fn analytics_route_reports_unknown_keys_as_warnings() {
        let (status, body) = post_json(
            app(engine(), true),
            "/api/v1/persony/analytics",
            json!({ "answers": { "P-IE-01": 3, "bogus": 2 } }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["completed"], false);
        assert_eq!(
            body["warnings"],
            json!([{ "kind": "unknown_answer_key", "key": "bogus" }])
        );

        let analytics = body["analytics"].as_array().expect("analytics array");
        assert_eq!(analytics.len(), 3);
        assert_eq!(analytics[0]["name"], "BASE_MBTI_TRAITS");
        assert_eq!(analytics[2]["name"], "JUNG_FUNCTIONS");
    }

    #[tokio::test]
    async fn result_route_rejects_incomplete_answer_maps() {
        let (status, body) = post_json(
            app(engine(), true),
            "/api/v1/persony/result",
            json!({ "answers": { "P-IE-01": 1 } }),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["phase"], "PREFERENCES");
        assert_eq!(body["remaining"], 71);
    }

    #[tokio::test]
    async fn result_route_labels_completed_answer_maps() {
        let engine = engine();
        let report = simulate(engine.as_ref(), 3, None).expect("simulation runs");

        let (status, body) = post_json(
            app(engine, true),
            "/api/v1/persony/result",
            json!({ "answers": report.answers }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["completed"], true);
        assert_eq!(body["label"], report.label);
    }

    #[tokio::test]
    async fn readiness_reflects_the_startup_flag() {
        let response = app(engine(), false)
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(engine(), true)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
