//! Collection service: accepts submissions and serves anonymized records.
//!
//! Pure data operations, no HTTP concerns. The REST layer maps [`CollectionError`] onto status
//! codes.

use crate::config::{CoreConfig, PresencePolicy};
use crate::error::{CollectionError, CollectionResult, StoreError};
use crate::ids::SubmissionIdGenerator;
use crate::schema::questionnaire;
use crate::store::{InMemoryStore, SubmissionStore};
use crate::submission::Submission;
use api_shared::ListQuestionnairesRes;
use serde_json::Value;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct CollectionService {
    store: Arc<dyn SubmissionStore>,
    ids: Arc<Mutex<SubmissionIdGenerator>>,
    required: Arc<[&'static str]>,
    policy: PresencePolicy,
}

impl CollectionService {
    /// Service backed by `store`, checking the questionnaire's required fields.
    pub fn new(cfg: &CoreConfig, store: Arc<dyn SubmissionStore>) -> Self {
        Self {
            store,
            ids: Arc::new(Mutex::new(SubmissionIdGenerator::new())),
            required: questionnaire().required_keys().into(),
            policy: cfg.presence_policy(),
        }
    }

    /// Service with a fresh process-lifetime store.
    pub fn in_memory(cfg: &CoreConfig) -> Self {
        Self::new(cfg, Arc::new(InMemoryStore::new()))
    }

    /// Keys checked by [`Self::create_submission`], in the order they are checked.
    pub fn required_fields(&self) -> &[&'static str] {
        &self.required
    }

    /// Validate and store one submission.
    ///
    /// The body must be a JSON object. Required fields are checked in order and the first one
    /// that is missing is reported; nothing is stored in that case. On success the full body is
    /// stored, including keys the questionnaire does not declare.
    ///
    /// # Returns
    /// The assigned submission id.
    ///
    /// # Errors
    /// - [`CollectionError::InvalidBody`] if the body is not a JSON object.
    /// - [`CollectionError::MissingField`] naming the first missing required field.
    /// - [`CollectionError::Store`] if the store fails.
    pub fn create_submission(&self, body: Value) -> CollectionResult<String> {
        let Value::Object(body) = body else {
            return Err(CollectionError::InvalidBody(
                "request body must be a JSON object".into(),
            ));
        };

        if let Some(missing) = self
            .required
            .iter()
            .find(|key| !self.policy.is_present(body.get(**key)))
        {
            return Err(CollectionError::MissingField((*missing).to_string()));
        }

        // Id assignment and append happen under one lock so ids follow insertion order.
        let mut ids = self.ids.lock().map_err(|_| StoreError::Poisoned)?;
        let assigned = ids.assign();
        self.store.append(Submission::new(
            assigned.id.clone(),
            assigned.submitted_at,
            body,
        ))?;

        tracing::info!("accepted submission {}", assigned.id);
        Ok(assigned.id)
    }

    /// Every stored submission, anonymized, in insertion order.
    ///
    /// # Errors
    /// Returns [`CollectionError::Store`] if the store fails.
    pub fn list_submissions(&self) -> CollectionResult<ListQuestionnairesRes> {
        let data: Vec<_> = self
            .store
            .list_all()?
            .iter()
            .map(Submission::anonymize)
            .collect();

        Ok(ListQuestionnairesRes {
            total: data.len(),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::IDENTIFYING_FIELDS;
    use serde_json::json;
    use std::collections::HashSet;

    fn valid_body() -> Value {
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

    fn service() -> CollectionService {
        CollectionService::in_memory(&CoreConfig::default())
    }

    #[test]
    fn accepts_valid_submission() {
        let svc = service();
        let id = svc.create_submission(valid_body()).expect("accepted");
        assert!(!id.is_empty());
        assert!(id.parse::<i64>().is_ok());

        let listing = svc.list_submissions().unwrap();
        assert_eq!(listing.total, 1);
        assert_eq!(listing.data[0].id, id);
    }

    #[test]
    fn reports_first_missing_field_only() {
        let svc = service();
        let mut body = valid_body();
        let obj = body.as_object_mut().unwrap();
        obj.remove("gender");
        obj.remove("followUpRequired");

        let err = svc.create_submission(body).expect_err("missing");
        assert_eq!(err.to_string(), "Missing required field: gender");
        assert_eq!(svc.list_submissions().unwrap().total, 0);
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let svc = service();
        let mut body = valid_body();
        body["doctorName"] = json!("");
        let err = svc.create_submission(body).expect_err("missing");
        assert!(matches!(err, CollectionError::MissingField(f) if f == "doctorName"));
    }

    #[test]
    fn numeric_zero_depends_on_policy() {
        let mut body = valid_body();
        body["yearsOfExperience"] = json!(0);

        let err = service()
            .create_submission(body.clone())
            .expect_err("zero is falsy");
        assert!(matches!(err, CollectionError::MissingField(f) if f == "yearsOfExperience"));

        let lenient =
            CollectionService::in_memory(&CoreConfig::new(PresencePolicy::ZeroIsPresent));
        assert!(lenient.create_submission(body).is_ok());
    }

    #[test]
    fn rejects_non_object_body() {
        let err = service()
            .create_submission(json!(["not", "an", "object"]))
            .expect_err("invalid");
        assert!(matches!(err, CollectionError::InvalidBody(_)));
    }

    #[test]
    fn listing_never_contains_identifiers() {
        let svc = service();
        let mut body = valid_body();
        body["respiratoryComplications"] = json!(["Apnea", "Pneumonia"]);
        body["treatmentPlan"] = json!("observe");
        svc.create_submission(body.clone()).unwrap();

        let listing = svc.list_submissions().unwrap();
        let record = serde_json::to_value(&listing.data[0]).unwrap();
        let record = record.as_object().unwrap();

        for key in IDENTIFYING_FIELDS {
            assert!(!record.contains_key(key));
        }
        for (key, value) in record {
            if key == "id" || key == "submittedAt" {
                continue;
            }
            assert_eq!(&body[key.as_str()], value, "{key} changed");
        }
        assert_eq!(record.len(), 15);
    }

    #[test]
    fn concurrent_submissions_get_distinct_ids() {
        let svc = service();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let svc = svc.clone();
                std::thread::spawn(move || svc.create_submission(valid_body()).unwrap())
            })
            .collect();
        let ids: HashSet<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(ids.len(), 8);
        let listing = svc.list_submissions().unwrap();
        assert_eq!(listing.total, 8);

        // Ids follow insertion order.
        let listed: Vec<i64> = listing.data.iter().map(|r| r.id.parse().unwrap()).collect();
        assert!(listed.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn required_fields_are_the_questionnaire_keys() {
        assert_eq!(service().required_fields().len(), 16);
        assert_eq!(service().required_fields()[0], "doctorName");
    }
}
