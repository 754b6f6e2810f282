//! # NeoLung Client
//!
//! Sends completed questionnaires to the collection service and reads back the anonymized
//! listing.
//!
//! Each call makes exactly one request. There is no retry and no timeout beyond the HTTP
//! client's defaults; every failure is terminal to the attempt and the caller decides whether
//! to try again.

#![warn(rust_2018_idioms)]

use api_shared::{ErrorRes, ListQuestionnairesRes, SubmitQuestionnaireReq, SubmitQuestionnaireRes};
use neolung_core::{constants::*, FormError, FormStateMachine, FormValues};
use reqwest::StatusCode;

/// Path of the questionnaire collection endpoint, relative to the server base URL.
pub const QUESTIONNAIRE_PATH: &str = "/api/questionnaire";

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The form did not pass local validation, or is already being submitted.
    #[error(transparent)]
    Form(#[from] FormError),
    /// The server rejected the body (`400`); carries the server's message.
    #[error("server rejected submission: {0}")]
    ServerValidation(String),
    /// The server failed while handling the request (`5xx`).
    #[error("server error ({status}): {message}")]
    Internal { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response ({status}): {detail}")]
    UnexpectedResponse { status: u16, detail: String },
}

impl SubmitError {
    /// Message suitable for showing to the person who filled the form.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Form(FormError::MissingFields(missing)) => format!(
                "Please complete the required fields: {}.",
                missing.keys.join(", ")
            ),
            SubmitError::Form(FormError::AlreadySubmitting) => {
                "Your questionnaire is already being submitted.".into()
            }
            SubmitError::ServerValidation(message) => {
                format!("Error submitting questionnaire: {message}. Please try again.")
            }
            _ => "Error submitting questionnaire. Please try again.".into(),
        }
    }
}

pub type SubmitResult<T> = std::result::Result<T, SubmitError>;

/// Build the wire body from form values.
///
/// Every key is sent; unanswered fields go out empty so the server applies its own presence
/// check.
pub fn to_request(values: &FormValues) -> SubmitQuestionnaireReq {
    let text = |key: &str| values.text(key).to_owned();

    SubmitQuestionnaireReq {
        doctor_name: text(DOCTOR_NAME),
        hospital_name: text(HOSPITAL_NAME),
        specialization: text(SPECIALIZATION),
        years_of_experience: text(YEARS_OF_EXPERIENCE),
        patient_id: text(PATIENT_ID),
        birth_date: text(BIRTH_DATE),
        gestational_age: text(GESTATIONAL_AGE),
        birth_weight: text(BIRTH_WEIGHT),
        gender: text(GENDER),
        mother_residence_area: text(MOTHER_RESIDENCE_AREA),
        proximity_to_industrial_area: text(PROXIMITY_TO_INDUSTRIAL_AREA),
        air_quality_index: text(AIR_QUALITY_INDEX),
        smoking_exposure: text(SMOKING_EXPOSURE),
        respiratory_complications: values.selection(RESPIRATORY_COMPLICATIONS),
        breathing_patterns: text(BREATHING_PATTERNS),
        oxygen_requirement: text(OXYGEN_REQUIREMENT),
        lung_function_tests: text(LUNG_FUNCTION_TESTS),
        additional_findings: text(ADDITIONAL_FINDINGS),
        follow_up_required: text(FOLLOW_UP_REQUIRED),
        treatment_plan: text(TREATMENT_PLAN),
    }
}

/// HTTP client for the collection service.
#[derive(Clone, Debug)]
pub struct SubmissionClient {
    http: reqwest::Client,
    base_url: String,
}

impl SubmissionClient {
    /// Client for the server at `base_url` (for example `http://127.0.0.1:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, QUESTIONNAIRE_PATH)
    }

    /// Send `values` to the collection service.
    ///
    /// Callers are expected to have validated the form first; use [`Self::submit_form`] to get
    /// validation and the in-flight guard together.
    ///
    /// # Returns
    /// The server-issued submission id.
    ///
    /// # Errors
    /// - [`SubmitError::ServerValidation`] on `400`.
    /// - [`SubmitError::Internal`] on `5xx`.
    /// - [`SubmitError::Transport`] if the request could not be completed.
    /// - [`SubmitError::UnexpectedResponse`] for any other status or an unreadable body.
    pub async fn submit(&self, values: &FormValues) -> SubmitResult<String> {
        let response = self
            .http
            .post(self.endpoint())
            .json(&to_request(values))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            let res: SubmitQuestionnaireRes =
                serde_json::from_str(&body).map_err(|e| SubmitError::UnexpectedResponse {
                    status: status.as_u16(),
                    detail: e.to_string(),
                })?;
            tracing::debug!("questionnaire accepted as {}", res.submission_id);
            return Ok(res.submission_id);
        }

        Err(error_from_response(status, &body))
    }

    /// Validate, guard and submit the form.
    ///
    /// The form's in-flight flag is set for the duration of the request and cleared afterwards
    /// whatever the outcome. The form's values and position are not touched.
    ///
    /// # Errors
    /// [`SubmitError::Form`] if the form is incomplete or already submitting (no request is
    /// made), otherwise as [`Self::submit`].
    pub async fn submit_form(&self, form: &mut FormStateMachine) -> SubmitResult<String> {
        let values = form.begin_submission()?;
        let result = self.submit(&values).await;
        form.finish_submission();
        if let Err(e) = &result {
            tracing::warn!("questionnaire submission failed: {}", e);
        }
        result
    }

    /// Fetch every stored submission in anonymized form.
    ///
    /// # Errors
    /// As [`Self::submit`].
    pub async fn list(&self) -> SubmitResult<ListQuestionnairesRes> {
        let response = self.http.get(self.endpoint()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| SubmitError::UnexpectedResponse {
                status: status.as_u16(),
                detail: e.to_string(),
            });
        }

        Err(error_from_response(status, &body))
    }
}

fn error_from_response(status: StatusCode, body: &str) -> SubmitError {
    let message = serde_json::from_str::<ErrorRes>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.to_string());

    if status == StatusCode::BAD_REQUEST {
        SubmitError::ServerValidation(message)
    } else if status.is_server_error() {
        SubmitError::Internal {
            status: status.as_u16(),
            message,
        }
    } else {
        SubmitError::UnexpectedResponse {
            status: status.as_u16(),
            detail: message,
        }
    }
}
