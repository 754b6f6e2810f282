//! Required-field validation for the questionnaire.
//!
//! Only presence is checked. Numeric answers are not range checked or coerced, and free-text
//! answers carry no length or format constraints.

use crate::schema::FormSchema;
use crate::values::FormValues;

/// Required fields that are still unanswered in one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields {
    /// Index of the failing section.
    pub section: usize,
    /// Missing keys in field declaration order. Never empty.
    pub keys: Vec<&'static str>,
}

impl std::fmt::Display for MissingFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "section {} is missing required fields: {}",
            self.section + 1,
            self.keys.join(", ")
        )
    }
}

/// Check the required fields of section `index`.
///
/// An index outside the schema has no required fields and passes.
///
/// # Errors
///
/// Returns [`MissingFields`] listing every required key of the section that is absent or empty.
pub fn validate_section(
    schema: &FormSchema,
    index: usize,
    values: &FormValues,
) -> Result<(), MissingFields> {
    let Some(section) = schema.section(index) else {
        return Ok(());
    };

    let keys: Vec<&'static str> = section
        .required_keys()
        .filter(|key| !values.is_present(key))
        .collect();

    if keys.is_empty() {
        Ok(())
    } else {
        Err(MissingFields {
            section: index,
            keys,
        })
    }
}

/// Check every section in order, reporting the first one that fails.
///
/// # Errors
///
/// Returns the [`MissingFields`] of the first failing section.
pub fn validate_all(schema: &FormSchema, values: &FormValues) -> Result<(), MissingFields> {
    (0..schema.len()).try_for_each(|index| validate_section(schema, index, values))
}
