//! Accepted submissions and their anonymized projection.

use crate::constants::*;
use crate::ids::format_timestamp;
use api_shared::AnonymizedRecord;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// One accepted questionnaire.
///
/// Holds the submitted JSON object exactly as received (including keys the schema does not
/// know) plus the server-assigned id and timestamp. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    id: String,
    submitted_at: DateTime<Utc>,
    body: Map<String, Value>,
}

impl Submission {
    pub fn new(id: String, submitted_at: DateTime<Utc>, body: Map<String, Value>) -> Self {
        Self {
            id,
            submitted_at,
            body,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    /// Project to the shape served to research consumers.
    ///
    /// Built from an explicit allow-list, so identifiers and any key outside the list never
    /// leave the service.
    pub fn anonymize(&self) -> AnonymizedRecord {
        let field = |key: &str| self.body.get(key).cloned();

        AnonymizedRecord {
            id: self.id.clone(),
            submitted_at: format_timestamp(&self.submitted_at),
            specialization: field(SPECIALIZATION),
            years_of_experience: field(YEARS_OF_EXPERIENCE),
            gestational_age: field(GESTATIONAL_AGE),
            birth_weight: field(BIRTH_WEIGHT),
            gender: field(GENDER),
            mother_residence_area: field(MOTHER_RESIDENCE_AREA),
            proximity_to_industrial_area: field(PROXIMITY_TO_INDUSTRIAL_AREA),
            air_quality_index: field(AIR_QUALITY_INDEX),
            smoking_exposure: field(SMOKING_EXPOSURE),
            respiratory_complications: field(RESPIRATORY_COMPLICATIONS),
            breathing_patterns: field(BREATHING_PATTERNS),
            oxygen_requirement: field(OXYGEN_REQUIREMENT),
            follow_up_required: field(FOLLOW_UP_REQUIRED),
        }
    }
}
