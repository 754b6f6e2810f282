//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into core services, so request
//! handling never reads process-wide environment variables.

use crate::error::{ConfigError, ConfigResult};
use serde_json::Value;
use std::str::FromStr;

/// How the collection service decides whether a required value is present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PresencePolicy {
    /// `null`, `false`, numeric `0`, `""` and `[]` are all missing.
    ///
    /// This rejects a legitimately zero numeric answer sent as a JSON number. Answers sent as
    /// strings (`"0"`) are unaffected.
    #[default]
    Falsy,
    /// As `Falsy`, except numeric zero and `false` count as present.
    ZeroIsPresent,
}

impl PresencePolicy {
    /// Whether `value` satisfies a required field under this policy.
    pub fn is_present(self, value: Option<&Value>) -> bool {
        match value {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(_)) => true,
            Some(Value::Bool(b)) => *b || self == PresencePolicy::ZeroIsPresent,
            Some(Value::Number(n)) => {
                self == PresencePolicy::ZeroIsPresent || n.as_f64().is_some_and(|f| f != 0.0)
            }
        }
    }
}

impl FromStr for PresencePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "falsy" => Ok(PresencePolicy::Falsy),
            "zero-is-present" | "zero_is_present" => Ok(PresencePolicy::ZeroIsPresent),
            _ => Err(ConfigError::InvalidValue {
                name: PRESENCE_POLICY_ENV,
                value: s.to_string(),
            }),
        }
    }
}

/// Environment variable selecting the [`PresencePolicy`].
pub const PRESENCE_POLICY_ENV: &str = "NEOLUNG_PRESENCE_POLICY";

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    presence_policy: PresencePolicy,
}

impl CoreConfig {
    pub fn new(presence_policy: PresencePolicy) -> Self {
        Self { presence_policy }
    }

    pub fn presence_policy(&self) -> PresencePolicy {
        self.presence_policy
    }
}

/// Parse the presence policy from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default policy.
pub fn presence_policy_from_env_value(value: Option<String>) -> ConfigResult<PresencePolicy> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<PresencePolicy>()).transpose()?;

    Ok(parsed.unwrap_or_default())
}
