//! # NeoLung Core
//!
//! Core logic for the neonatal lung development research questionnaire.
//!
//! This crate contains:
//! - The static questionnaire schema (`schema`)
//! - The multi-step form state machine and its drafts (`form`)
//! - Required-field validation (`validation`)
//! - The collection service with its pluggable submission store (`collection`, `store`)
//!
//! **No API concerns**: HTTP servers and clients belong in `api-rest` and `neolung-client`.

pub mod collection;
pub mod config;
pub mod constants;
pub mod error;
pub mod form;
pub mod ids;
pub mod schema;
pub mod store;
pub mod submission;
pub mod validation;
pub mod values;

pub use collection::CollectionService;
pub use config::{presence_policy_from_env_value, CoreConfig, PresencePolicy};
pub use error::{
    CollectionError, CollectionResult, ConfigError, FormError, FormResult, StoreError,
    StoreResult,
};
pub use form::{FormDraft, FormStateMachine};
pub use schema::{questionnaire, ChoiceOption, FieldKind, FieldSpec, FormSchema, Section};
pub use store::{InMemoryStore, SubmissionStore};
pub use submission::Submission;
pub use validation::{validate_all, validate_section, MissingFields};
pub use values::{FieldValue, FormValues};
