//! Multi-step form state machine.
//!
//! The machine owns the current section index and the accumulated answers. All edits go through
//! [`FormStateMachine::update_field`] and all page changes through [`FormStateMachine::go_next`]
//! and [`FormStateMachine::go_previous`]; nothing else mutates the state. The section index is
//! always within `0..=schema.last_index()`.
//!
//! Answers persist across navigation in both directions. Going forward is gated by the
//! validator, going back never is.
//!
//! Final submission is bracketed by [`FormStateMachine::begin_submission`] and
//! [`FormStateMachine::finish_submission`]. While a submission is in flight a second
//! `begin_submission` is refused, so a double click cannot send the same form twice.

use crate::error::{FormError, FormResult};
use crate::schema::{FormSchema, Section};
use crate::validation::{validate_all, validate_section};
use crate::values::{FieldValue, FormValues};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone)]
pub struct FormStateMachine {
    schema: &'static FormSchema,
    current: usize,
    values: FormValues,
    in_flight: bool,
}

/// Serialisable snapshot of a form in progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDraft {
    pub current_section: usize,
    pub values: Map<String, Value>,
}

impl FormStateMachine {
    /// A fresh form positioned on the first section with no answers.
    pub fn new(schema: &'static FormSchema) -> Self {
        Self {
            schema,
            current: 0,
            values: FormValues::new(),
            in_flight: false,
        }
    }

    /// Rebuild a form from a saved draft.
    ///
    /// A section index beyond the end of the schema is clamped to the last section.
    pub fn restore(schema: &'static FormSchema, draft: &FormDraft) -> Self {
        Self {
            schema,
            current: draft.current_section.min(schema.last_index()),
            values: FormValues::from_json(schema, &draft.values),
            in_flight: false,
        }
    }

    pub fn draft(&self) -> FormDraft {
        FormDraft {
            current_section: self.current,
            values: self.values.to_json(),
        }
    }

    pub fn schema(&self) -> &'static FormSchema {
        self.schema
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_section(&self) -> &'static Section {
        &self.schema.sections()[self.current]
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current == self.schema.last_index()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    /// Insert or overwrite the answer for `key`. No validation happens here.
    pub fn update_field(&mut self, key: impl Into<String>, value: FieldValue) {
        self.values.set(key, value);
    }

    /// Add or remove one option of a multi-choice answer.
    pub fn toggle_selection(&mut self, key: &str, option: &str, checked: bool) {
        let mut selection = self
            .values
            .get(key)
            .and_then(FieldValue::as_selection)
            .cloned()
            .unwrap_or_default();
        if checked {
            selection.insert(option.to_owned());
        } else {
            selection.remove(option);
        }
        self.update_field(key, FieldValue::Selection(selection));
    }

    /// Advance to the next section.
    ///
    /// On the last section this is a no-op. Otherwise the current section must pass validation;
    /// if it does not, the index is left unchanged.
    ///
    /// # Returns
    /// The section index after the call.
    ///
    /// # Errors
    /// Returns [`FormError::MissingFields`] naming the current section's missing required keys.
    pub fn go_next(&mut self) -> FormResult<usize> {
        if self.is_last() {
            return Ok(self.current);
        }
        validate_section(self.schema, self.current, &self.values)
            .map_err(FormError::MissingFields)?;
        self.current += 1;
        Ok(self.current)
    }

    /// Go back one section. No-op on the first section; never validated.
    pub fn go_previous(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    /// `(index + 1) / total`, for display only.
    pub fn progress_fraction(&self) -> f64 {
        (self.current + 1) as f64 / self.schema.len() as f64
    }

    /// Validate the whole form and mark a submission as in flight.
    ///
    /// # Returns
    /// A snapshot of the values to send.
    ///
    /// # Errors
    /// - [`FormError::AlreadySubmitting`] if a previous submission has not finished.
    /// - [`FormError::MissingFields`] for the first section with missing required keys.
    pub fn begin_submission(&mut self) -> FormResult<FormValues> {
        if self.in_flight {
            return Err(FormError::AlreadySubmitting);
        }
        validate_all(self.schema, &self.values).map_err(FormError::MissingFields)?;
        self.in_flight = true;
        Ok(self.values.clone())
    }

    /// Clear the in-flight flag once the submission attempt has completed either way.
    pub fn finish_submission(&mut self) {
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::schema::questionnaire;
    use crate::validation::MissingFields;

    fn choice(s: &str) -> FieldValue {
        FieldValue::Choice(s.into())
    }

    fn fill_section(form: &mut FormStateMachine, index: usize) {
        let section = &questionnaire().sections()[index];
        for field in section.fields.iter().filter(|f| f.required) {
            form.update_field(field.key, FieldValue::from_text(&field.kind, "x"));
        }
    }

    fn completed_form() -> FormStateMachine {
        let mut form = FormStateMachine::new(questionnaire());
        for index in 0..questionnaire().len() {
            fill_section(&mut form, index);
        }
        form
    }

    #[test]
    fn starts_on_first_section() {
        let form = FormStateMachine::new(questionnaire());
        assert_eq!(form.current_index(), 0);
        assert!(form.is_first());
        assert_eq!(form.current_section().title, "Doctor Information");
        assert!(form.values().is_empty());
    }

    #[test]
    fn go_next_blocked_by_missing_fields() {
        let mut form = FormStateMachine::new(questionnaire());
        form.update_field(DOCTOR_NAME, FieldValue::Text("Dr. A".into()));
        form.update_field(SPECIALIZATION, choice("pediatrics"));

        let err = form.go_next().expect_err("should block");
        assert_eq!(
            err,
            FormError::MissingFields(MissingFields {
                section: 0,
                keys: vec![HOSPITAL_NAME, YEARS_OF_EXPERIENCE],
            })
        );
        assert_eq!(form.current_index(), 0);
    }

    #[test]
    fn go_next_advances_when_section_valid() {
        let mut form = FormStateMachine::new(questionnaire());
        fill_section(&mut form, 0);
        assert_eq!(form.go_next(), Ok(1));
        assert_eq!(form.current_section().title, "Patient Details");
    }

    #[test]
    fn go_next_succeeds_iff_section_validates() {
        let mut form = completed_form();
        for index in 0..questionnaire().last_index() {
            assert_eq!(form.current_index(), index);
            assert!(validate_section(questionnaire(), index, form.values()).is_ok());
            assert_eq!(form.go_next(), Ok(index + 1));
        }
    }

    #[test]
    fn go_next_on_last_section_is_noop() {
        let mut form = FormStateMachine::restore(
            questionnaire(),
            &FormDraft {
                current_section: 4,
                values: Map::new(),
            },
        );
        // Last section is incomplete but next is still a no-op rather than an error.
        assert_eq!(form.go_next(), Ok(4));
        assert!(form.is_last());
    }

    #[test]
    fn go_previous_is_unconditional() {
        let mut form = completed_form();
        form.go_next().unwrap();
        form.go_next().unwrap();
        form.update_field(PATIENT_ID, FieldValue::Text(String::new()));

        assert_eq!(form.go_previous(), 1);
        assert_eq!(form.go_previous(), 0);
        assert_eq!(form.go_previous(), 0);
    }

    #[test]
    fn values_persist_across_navigation() {
        let mut form = FormStateMachine::new(questionnaire());
        fill_section(&mut form, 0);
        form.go_next().unwrap();
        form.update_field(GENDER, choice("female"));
        form.go_previous();
        assert_eq!(form.values().text(GENDER), "female");
        assert_eq!(form.values().text(DOCTOR_NAME), "x");
    }

    #[test]
    fn update_field_is_idempotent() {
        let mut once = FormStateMachine::new(questionnaire());
        once.update_field(GENDER, choice("male"));

        let mut twice = FormStateMachine::new(questionnaire());
        twice.update_field(GENDER, choice("male"));
        twice.update_field(GENDER, choice("male"));

        assert_eq!(once.values(), twice.values());
    }

    #[test]
    fn toggle_selection_adds_and_removes() {
        let mut form = FormStateMachine::new(questionnaire());
        form.toggle_selection(RESPIRATORY_COMPLICATIONS, "Apnea", true);
        form.toggle_selection(RESPIRATORY_COMPLICATIONS, "Pneumonia", true);
        form.toggle_selection(RESPIRATORY_COMPLICATIONS, "Apnea", false);
        assert_eq!(
            form.values().selection(RESPIRATORY_COMPLICATIONS),
            vec!["Pneumonia"]
        );
    }

    #[test]
    fn progress_fraction_tracks_index() {
        let mut form = completed_form();
        assert!((form.progress_fraction() - 0.2).abs() < f64::EPSILON);
        while !form.is_last() {
            form.go_next().unwrap();
        }
        assert!((form.progress_fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn begin_submission_requires_complete_form() {
        let mut form = FormStateMachine::new(questionnaire());
        fill_section(&mut form, 0);
        let err = form.begin_submission().expect_err("incomplete");
        assert!(matches!(err, FormError::MissingFields(m) if m.section == 1));
        assert!(!form.is_submitting());
    }

    #[test]
    fn begin_submission_guards_against_duplicates() {
        let mut form = completed_form();
        let snapshot = form.begin_submission().expect("valid form");
        assert_eq!(&snapshot, form.values());
        assert!(form.is_submitting());
        assert_eq!(form.begin_submission(), Err(FormError::AlreadySubmitting));

        form.finish_submission();
        assert!(form.begin_submission().is_ok());
    }

    #[test]
    fn draft_round_trip_restores_position_and_answers() {
        let mut form = FormStateMachine::new(questionnaire());
        fill_section(&mut form, 0);
        form.go_next().unwrap();
        form.toggle_selection(RESPIRATORY_COMPLICATIONS, "Apnea", true);

        let json = serde_json::to_string(&form.draft()).expect("serialize draft");
        let draft: FormDraft = serde_json::from_str(&json).expect("parse draft");
        let restored = FormStateMachine::restore(questionnaire(), &draft);

        assert_eq!(restored.current_index(), 1);
        assert_eq!(restored.values(), form.values());
    }

    #[test]
    fn restore_clamps_section_index() {
        let draft = FormDraft {
            current_section: 42,
            values: Map::new(),
        };
        let form = FormStateMachine::restore(questionnaire(), &draft);
        assert_eq!(form.current_index(), questionnaire().last_index());
    }
}
