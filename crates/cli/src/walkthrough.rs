//! Drives the form state machine from an answers file.
//!
//! Answers are applied one section at a time, exactly as a person paging through the form would:
//! fill the visible section, press next, repeat. A section with missing required answers stops
//! the walk on that section.

use anyhow::Context;
use neolung_core::{FieldValue, FormDraft, FormResult, FormSchema, FormStateMachine};
use serde_json::{Map, Value};
use std::path::Path;

pub type Answers = Map<String, Value>;

/// Read a YAML (or JSON) mapping of field key to answer.
pub fn load_answers(path: &Path) -> anyhow::Result<Answers> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file {}", path.display()))?;
    serde_yaml::from_str(&text)
        .with_context(|| format!("answers file {} is not a mapping", path.display()))
}

pub fn load_draft(path: &Path) -> anyhow::Result<FormDraft> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read draft {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid draft {}", path.display()))
}

pub fn save_draft(path: &Path, draft: &FormDraft) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(draft)?;
    std::fs::write(path, text)
        .with_context(|| format!("failed to write draft {}", path.display()))
}

/// Answer keys that no field of `schema` declares.
pub fn unknown_keys<'a>(schema: &FormSchema, answers: &'a Answers) -> Vec<&'a str> {
    answers
        .keys()
        .map(String::as_str)
        .filter(|key| schema.field(key).is_none())
        .collect()
}

/// Apply the answers for the fields of the current section only.
fn apply_section(form: &mut FormStateMachine, answers: &Answers) {
    for field in form.current_section().fields {
        let Some(raw) = answers.get(field.key) else {
            continue;
        };
        match FieldValue::from_json(&field.kind, raw) {
            Some(value) => form.update_field(field.key, value),
            None => tracing::warn!("ignoring unusable answer for {}", field.key),
        }
    }
}

/// Fill sections from the current one onwards, advancing while each section validates.
///
/// Stops on the last section without validating it; submission validates the whole form.
///
/// # Errors
/// Returns the missing fields of the section the walk stopped on. The form is left positioned
/// on that section with every answer applied so far.
pub fn walk(form: &mut FormStateMachine, answers: &Answers) -> FormResult<()> {
    loop {
        apply_section(form, answers);
        if form.is_last() {
            return Ok(());
        }
        form.go_next()?;
    }
}
