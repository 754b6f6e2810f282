//! JSON bodies exchanged over `/api/questionnaire`.
//!
//! Field names are camelCase on the wire to match the browser form the service was built for.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Questionnaire body as sent by the form client.
///
/// Every key is always present; unanswered fields are sent as empty strings (or an empty list
/// for `respiratoryComplications`) and the server decides whether they count as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuestionnaireReq {
    // Doctor information
    pub doctor_name: String,
    pub hospital_name: String,
    pub specialization: String,
    pub years_of_experience: String,

    // Patient details
    pub patient_id: String,
    pub birth_date: String,
    pub gestational_age: String,
    pub birth_weight: String,
    pub gender: String,

    // Environmental factors
    pub mother_residence_area: String,
    pub proximity_to_industrial_area: String,
    pub air_quality_index: String,
    pub smoking_exposure: String,

    // Lung development
    #[serde(default)]
    pub respiratory_complications: Vec<String>,
    pub breathing_patterns: String,
    pub oxygen_requirement: String,
    #[serde(default)]
    pub lung_function_tests: String,

    // Clinical summary
    #[serde(default)]
    pub additional_findings: String,
    pub follow_up_required: String,
    #[serde(default)]
    pub treatment_plan: String,
}

/// Response to an accepted submission (`201 Created`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuestionnaireRes {
    pub message: String,
    pub submission_id: String,
}

/// Error body used for every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

/// Listing of every stored submission, anonymized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListQuestionnairesRes {
    pub total: usize,
    pub data: Vec<AnonymizedRecord>,
}

/// A stored submission with direct identifiers removed.
///
/// Only the keys below are ever projected; `doctorName`, `hospitalName` and `patientId` have no
/// field here at all. Values are passed through exactly as submitted, and keys that were not
/// submitted are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnonymizedRecord {
    pub id: String,
    pub submitted_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gestational_age: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_weight: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_residence_area: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proximity_to_industrial_area: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_quality_index: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoking_exposure: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respiratory_complications: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breathing_patterns: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oxygen_requirement: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_required: Option<Value>,
}
