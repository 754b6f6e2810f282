//! # API REST
//!
//! REST API for the NeoLung collection service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS)
//!
//! Business rules live in `neolung-core`; this crate only maps them onto HTTP.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    AnonymizedRecord, ErrorRes, HealthRes, HealthService, ListQuestionnairesRes,
    SubmitQuestionnaireReq, SubmitQuestionnaireRes,
};
use neolung_core::{
    constants::{INTERNAL_ERROR_MESSAGE, SUBMISSION_ACCEPTED_MESSAGE},
    CollectionError, CollectionService,
};

/// Path of the questionnaire collection endpoint.
pub const QUESTIONNAIRE_PATH: &str = "/api/questionnaire";

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    pub collection: CollectionService,
}

type ApiError = (StatusCode, Json<ErrorRes>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorRes {
            error: error.into(),
        }),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(health, create_questionnaire, list_questionnaires),
    components(schemas(
        HealthRes,
        SubmitQuestionnaireReq,
        SubmitQuestionnaireRes,
        ListQuestionnairesRes,
        AnonymizedRecord,
        ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with Swagger UI, CORS and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            QUESTIONNAIRE_PATH,
            get(list_questionnaires).post(create_questionnaire),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/api/questionnaire",
    request_body = SubmitQuestionnaireReq,
    responses(
        (status = 201, description = "Questionnaire accepted", body = SubmitQuestionnaireRes),
        (status = 400, description = "Missing required field or malformed body", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Accept one questionnaire submission.
///
/// The body is taken as a raw JSON object so presence checks see exactly what the client sent
/// and unknown keys are stored as-is.
///
/// # Errors
/// - `400 Bad Request` with `Missing required field: <key>` for the first missing required
///   field, or a parse message for a malformed or non-object body.
/// - `500 Internal Server Error` if the store fails.
#[axum::debug_handler]
async fn create_questionnaire(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitQuestionnaireRes>), ApiError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::warn!("Rejected questionnaire body: {}", rejection.body_text());
        api_error(StatusCode::BAD_REQUEST, rejection.body_text())
    })?;

    match state.collection.create_submission(body) {
        Ok(submission_id) => Ok((
            StatusCode::CREATED,
            Json(SubmitQuestionnaireRes {
                message: SUBMISSION_ACCEPTED_MESSAGE.into(),
                submission_id,
            }),
        )),
        Err(e @ (CollectionError::MissingField(_) | CollectionError::InvalidBody(_))) => {
            tracing::warn!("Rejected questionnaire: {}", e);
            Err(api_error(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e) => {
            tracing::error!("Error processing questionnaire submission: {:?}", e);
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE,
            ))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/questionnaire",
    responses(
        (status = 200, description = "Anonymized submissions", body = ListQuestionnairesRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List every stored submission with direct identifiers removed.
///
/// # Errors
/// Returns `500 Internal Server Error` if the store fails.
#[axum::debug_handler]
async fn list_questionnaires(
    State(state): State<AppState>,
) -> Result<Json<ListQuestionnairesRes>, ApiError> {
    state.collection.list_submissions().map(Json).map_err(|e| {
        tracing::error!("Error retrieving questionnaires: {:?}", e);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use neolung_core::{
        CoreConfig, InMemoryStore, StoreError, StoreResult, Submission, SubmissionStore,
    };
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState {
            collection: CollectionService::in_memory(&CoreConfig::default()),
        })
    }

    fn scenario_body() -> Value {
        json!({
            "doctorName": "Dr. A",
            "hospitalName": "H",
            "specialization": "pediatrics",
            "yearsOfExperience": "5",
            "patientId": "P1",
            "birthDate": "2024-01-01",
            "gestationalAge": "38",
            "birthWeight": "3200",
            "gender": "male",
            "motherResidenceArea": "urban-high-pollution",
            "proximityToIndustrialArea": "1-5km",
            "airQualityIndex": "101-150",
            "smokingExposure": "none",
            "breathingPatterns": "normal",
            "oxygenRequirement": "none",
            "followUpRequired": "no"
        })
    }

    fn post_json(body: String) -> Request<Body> {
        Request::post(QUESTIONNAIRE_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn list(app: &Router) -> (StatusCode, Value) {
        send(
            app,
            Request::get(QUESTIONNAIRE_PATH)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = send(
            &app(),
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn valid_submission_is_created_and_listed_anonymized() {
        let app = app();
        let (status, body) = send(&app, post_json(scenario_body().to_string())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], SUBMISSION_ACCEPTED_MESSAGE);
        let id = body["submissionId"].as_str().expect("submissionId");
        assert!(!id.is_empty());

        let (status, listing) = list(&app).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listing["total"], 1);
        let record = &listing["data"][0];
        assert_eq!(record["id"], id);
        assert_eq!(record["gender"], "male");
        for key in ["doctorName", "hospitalName", "patientId"] {
            assert!(record.get(key).is_none(), "{key} leaked");
        }
    }

    #[tokio::test]
    async fn missing_field_is_rejected_without_storing() {
        let app = app();
        let mut body = scenario_body();
        body.as_object_mut().unwrap().remove("gender");

        let (status, err) = send(&app, post_json(body.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err, json!({"error": "Missing required field: gender"}));

        let (_, listing) = list(&app).await;
        assert_eq!(listing["total"], 0);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let (status, err) = send(&app(), post_json("{not json".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(err["error"].is_string());
    }

    #[tokio::test]
    async fn non_object_body_is_bad_request() {
        let (status, err) = send(&app(), post_json("[1, 2, 3]".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(err["error"].as_str().unwrap().contains("JSON object"));
    }

    #[tokio::test]
    async fn near_simultaneous_submissions_both_succeed() {
        let app = app();
        let (first, second) = tokio::join!(
            send(&app, post_json(scenario_body().to_string())),
            send(&app, post_json(scenario_body().to_string())),
        );
        assert_eq!(first.0, StatusCode::CREATED);
        assert_eq!(second.0, StatusCode::CREATED);
        assert_ne!(first.1["submissionId"], second.1["submissionId"]);

        let (_, listing) = list(&app).await;
        assert_eq!(listing["total"], 2);
        assert_ne!(listing["data"][0]["id"], listing["data"][1]["id"]);
    }

    struct FailingStore;

    impl SubmissionStore for FailingStore {
        fn append(&self, _submission: Submission) -> StoreResult<()> {
            Err(StoreError::Poisoned)
        }

        fn list_all(&self) -> StoreResult<Vec<Submission>> {
            Err(StoreError::Poisoned)
        }
    }

    #[tokio::test]
    async fn store_failures_are_opaque_500s() {
        let app = router(AppState {
            collection: CollectionService::new(&CoreConfig::default(), Arc::new(FailingStore)),
        });

        let (status, err) = send(&app, post_json(scenario_body().to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err, json!({"error": "Internal server error"}));

        let (status, err) = list(&app).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err["error"], INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn swapping_the_store_keeps_validation() {
        let store = Arc::new(InMemoryStore::new());
        let app = router(AppState {
            collection: CollectionService::new(&CoreConfig::default(), store.clone()),
        });
        send(&app, post_json(scenario_body().to_string())).await;
        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(
            store.list_all().unwrap()[0].body()["doctorName"],
            json!("Dr. A")
        );
    }

    #[test]
    fn openapi_document_lists_questionnaire_path() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(QUESTIONNAIRE_PATH));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
