//! Constants used throughout the NeoLung core crate.
//!
//! Field keys are the camelCase names used on the wire, so the same constant serves the form,
//! the validator and the collection service.

pub const DOCTOR_NAME: &str = "doctorName";
pub const HOSPITAL_NAME: &str = "hospitalName";
pub const SPECIALIZATION: &str = "specialization";
pub const YEARS_OF_EXPERIENCE: &str = "yearsOfExperience";

pub const PATIENT_ID: &str = "patientId";
pub const BIRTH_DATE: &str = "birthDate";
pub const GESTATIONAL_AGE: &str = "gestationalAge";
pub const BIRTH_WEIGHT: &str = "birthWeight";
pub const GENDER: &str = "gender";

pub const MOTHER_RESIDENCE_AREA: &str = "motherResidenceArea";
pub const PROXIMITY_TO_INDUSTRIAL_AREA: &str = "proximityToIndustrialArea";
pub const AIR_QUALITY_INDEX: &str = "airQualityIndex";
pub const SMOKING_EXPOSURE: &str = "smokingExposure";

pub const RESPIRATORY_COMPLICATIONS: &str = "respiratoryComplications";
pub const BREATHING_PATTERNS: &str = "breathingPatterns";
pub const OXYGEN_REQUIREMENT: &str = "oxygenRequirement";
pub const LUNG_FUNCTION_TESTS: &str = "lungFunctionTests";

pub const ADDITIONAL_FINDINGS: &str = "additionalFindings";
pub const FOLLOW_UP_REQUIRED: &str = "followUpRequired";
pub const TREATMENT_PLAN: &str = "treatmentPlan";

/// Direct identifiers removed before records are served to research consumers.
pub const IDENTIFYING_FIELDS: [&str; 3] = [DOCTOR_NAME, HOSPITAL_NAME, PATIENT_ID];

/// Message returned alongside a newly assigned submission id.
pub const SUBMISSION_ACCEPTED_MESSAGE: &str = "Questionnaire submitted successfully";

/// Opaque message for unexpected server-side failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
