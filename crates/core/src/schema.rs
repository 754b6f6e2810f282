//! Static declaration of the questionnaire.
//!
//! The questionnaire is five sections long and its order is fixed. Each field declares its wire
//! key, a human label, the kind of answer it takes and whether it is required before the section
//! can be left forward. The [`FormSchema`] returned by [`questionnaire`] is the single source for
//! the required-field list used by both the client-side validator and the collection service.

use crate::constants::*;

/// One selectable option of a choice field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Value stored and sent on the wire.
    pub value: &'static str,
    /// Label shown to the person filling the form.
    pub label: &'static str,
}

/// The kind of answer a field takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line free text.
    Text,
    /// Multi-line free text.
    LongText,
    /// Calendar date, kept as the `YYYY-MM-DD` string the user entered.
    Date,
    /// Numeric answer kept as a string. Only presence is checked.
    Numeric,
    /// Exactly one of the listed options.
    SingleChoice(&'static [ChoiceOption]),
    /// Any subset of the listed options.
    MultiChoice(&'static [ChoiceOption]),
}

impl FieldKind {
    /// Options for choice fields, empty for everything else.
    pub fn options(&self) -> &'static [ChoiceOption] {
        match self {
            FieldKind::SingleChoice(options) | FieldKind::MultiChoice(options) => options,
            _ => &[],
        }
    }

    pub fn is_multi_choice(&self) -> bool {
        matches!(self, FieldKind::MultiChoice(_))
    }
}

/// A single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// One page of the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Section {
    /// Keys of the required fields in declaration order.
    pub fn required_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.required).map(|f| f.key)
    }

    pub fn field_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.key)
    }
}

/// Ordered list of sections making up a questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSchema {
    sections: &'static [Section],
}

impl FormSchema {
    /// Build a schema from a static section list.
    ///
    /// The list must not be empty; the form state machine relies on index `0` existing.
    pub const fn new(sections: &'static [Section]) -> Self {
        assert!(!sections.is_empty(), "a form needs at least one section");
        Self { sections }
    }

    pub fn sections(&self) -> &'static [Section] {
        self.sections
    }

    pub fn section(&self, index: usize) -> Option<&'static Section> {
        self.sections.get(index)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always false; kept alongside `len` for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.sections.len() - 1
    }

    /// Look up a field by wire key across all sections.
    pub fn field(&self, key: &str) -> Option<&'static FieldSpec> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.key == key)
    }

    /// Every required key, section by section, in declaration order.
    pub fn required_keys(&self) -> Vec<&'static str> {
        self.sections
            .iter()
            .flat_map(|s| s.required_keys())
            .collect()
    }
}

const fn opt(value: &'static str, label: &'static str) -> ChoiceOption {
    ChoiceOption { value, label }
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind, required: bool) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind,
        required,
    }
}

const SPECIALIZATIONS: &[ChoiceOption] = &[
    opt("neonatology", "Neonatology"),
    opt("pediatrics", "Pediatrics"),
    opt("pulmonology", "Pulmonology"),
    opt("family-medicine", "Family Medicine"),
    opt("other", "Other"),
];

const GENDERS: &[ChoiceOption] = &[opt("male", "Male"), opt("female", "Female")];

const RESIDENCE_AREAS: &[ChoiceOption] = &[
    opt("urban-high-pollution", "Urban - High Pollution"),
    opt("urban-moderate-pollution", "Urban - Moderate Pollution"),
    opt("suburban", "Suburban"),
    opt("rural", "Rural"),
];

const INDUSTRIAL_PROXIMITY: &[ChoiceOption] = &[
    opt("less-than-1km", "Less than 1 km"),
    opt("1-5km", "1-5 km"),
    opt("5-10km", "5-10 km"),
    opt("more-than-10km", "More than 10 km"),
];

const AIR_QUALITY_RANGES: &[ChoiceOption] = &[
    opt("0-50", "0-50 (Good)"),
    opt("51-100", "51-100 (Moderate)"),
    opt("101-150", "101-150 (Unhealthy for Sensitive)"),
    opt("151-200", "151-200 (Unhealthy)"),
    opt("201+", "201+ (Very Unhealthy)"),
];

const SMOKING_EXPOSURES: &[ChoiceOption] = &[
    opt("none", "No exposure"),
    opt("passive", "Passive smoking"),
    opt("active", "Active smoking"),
];

const RESPIRATORY_COMPLICATION_OPTIONS: &[ChoiceOption] = &[
    opt("Respiratory Distress Syndrome", "Respiratory Distress Syndrome"),
    opt("Bronchopulmonary Dysplasia", "Bronchopulmonary Dysplasia"),
    opt("Pneumonia", "Pneumonia"),
    opt("Meconium Aspiration", "Meconium Aspiration"),
    opt("Pneumothorax", "Pneumothorax"),
    opt("Apnea", "Apnea"),
];

const BREATHING_PATTERN_OPTIONS: &[ChoiceOption] = &[
    opt("normal", "Normal"),
    opt("tachypnea", "Tachypnea"),
    opt("bradypnea", "Bradypnea"),
    opt("irregular", "Irregular"),
];

const OXYGEN_REQUIREMENT_OPTIONS: &[ChoiceOption] = &[
    opt("none", "No supplemental oxygen"),
    opt("low-flow", "Low-flow nasal cannula"),
    opt("high-flow", "High-flow nasal cannula"),
    opt("cpap", "CPAP"),
    opt("mechanical-ventilation", "Mechanical ventilation"),
];

const FOLLOW_UP_OPTIONS: &[ChoiceOption] = &[
    opt("yes", "Yes, follow-up scheduled"),
    opt("no", "No follow-up needed"),
];

const SECTIONS: &[Section] = &[
    Section {
        title: "Doctor Information",
        description: "Your professional details",
        fields: &[
            field(DOCTOR_NAME, "Full Name", FieldKind::Text, true),
            field(HOSPITAL_NAME, "Hospital/Clinic Name", FieldKind::Text, true),
            field(
                SPECIALIZATION,
                "Specialization",
                FieldKind::SingleChoice(SPECIALIZATIONS),
                true,
            ),
            field(YEARS_OF_EXPERIENCE, "Years of Experience", FieldKind::Numeric, true),
        ],
    },
    Section {
        title: "Patient Details",
        description: "Neonatal patient information",
        fields: &[
            field(PATIENT_ID, "Patient ID", FieldKind::Text, true),
            field(BIRTH_DATE, "Birth Date", FieldKind::Date, true),
            field(GESTATIONAL_AGE, "Gestational Age (weeks)", FieldKind::Numeric, true),
            field(BIRTH_WEIGHT, "Birth Weight (grams)", FieldKind::Numeric, true),
            field(GENDER, "Gender", FieldKind::SingleChoice(GENDERS), true),
        ],
    },
    Section {
        title: "Environmental Factors",
        description: "Pollution and environmental exposure",
        fields: &[
            field(
                MOTHER_RESIDENCE_AREA,
                "Mother's Residence Area",
                FieldKind::SingleChoice(RESIDENCE_AREAS),
                true,
            ),
            field(
                PROXIMITY_TO_INDUSTRIAL_AREA,
                "Proximity to Industrial Area",
                FieldKind::SingleChoice(INDUSTRIAL_PROXIMITY),
                true,
            ),
            field(
                AIR_QUALITY_INDEX,
                "Average Air Quality Index",
                FieldKind::SingleChoice(AIR_QUALITY_RANGES),
                true,
            ),
            field(
                SMOKING_EXPOSURE,
                "Smoking Exposure During Pregnancy",
                FieldKind::SingleChoice(SMOKING_EXPOSURES),
                true,
            ),
        ],
    },
    Section {
        title: "Lung Development",
        description: "Respiratory health assessment",
        fields: &[
            // No complications is a valid clinical outcome, so this is never required.
            field(
                RESPIRATORY_COMPLICATIONS,
                "Respiratory Complications (check all that apply)",
                FieldKind::MultiChoice(RESPIRATORY_COMPLICATION_OPTIONS),
                false,
            ),
            field(
                BREATHING_PATTERNS,
                "Breathing Patterns",
                FieldKind::SingleChoice(BREATHING_PATTERN_OPTIONS),
                true,
            ),
            field(
                OXYGEN_REQUIREMENT,
                "Oxygen Requirement",
                FieldKind::SingleChoice(OXYGEN_REQUIREMENT_OPTIONS),
                true,
            ),
            field(
                LUNG_FUNCTION_TESTS,
                "Lung Function Test Results",
                FieldKind::LongText,
                false,
            ),
        ],
    },
    Section {
        title: "Clinical Summary",
        description: "Observations and recommendations",
        fields: &[
            field(
                ADDITIONAL_FINDINGS,
                "Additional Clinical Findings",
                FieldKind::LongText,
                false,
            ),
            field(
                FOLLOW_UP_REQUIRED,
                "Follow-up Required",
                FieldKind::SingleChoice(FOLLOW_UP_OPTIONS),
                true,
            ),
            field(TREATMENT_PLAN, "Treatment Plan", FieldKind::LongText, false),
        ],
    },
];

static QUESTIONNAIRE: FormSchema = FormSchema::new(SECTIONS);

/// The neonatal lung development questionnaire.
pub fn questionnaire() -> &'static FormSchema {
    &QUESTIONNAIRE
}
