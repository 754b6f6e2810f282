//! Submission identifiers.
//!
//! A submission id is the decimal string of a millisecond Unix timestamp. Ids must stay distinct
//! even when two submissions arrive within the same millisecond, so the generator remembers the
//! last id it issued and bumps the next one by at least 1 ms when the clock has not moved past
//! it. Callers serialise access to the generator (the collection service holds it under the same
//! lock as its store).

use chrono::{DateTime, SecondsFormat, Utc};

/// Monotonic millisecond id source.
#[derive(Debug, Default)]
pub struct SubmissionIdGenerator {
    last: Option<i64>,
}

/// A freshly assigned id together with the time it was assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedId {
    pub id: String,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next id for a submission received at `now`.
    ///
    /// The id is strictly greater than every id previously issued by this generator.
    /// `submitted_at` is always `now`, even when the id had to be bumped.
    pub fn assign_at(&mut self, now: DateTime<Utc>) -> AssignedId {
        let millis = now.timestamp_millis();
        let millis = match self.last {
            Some(prev) if millis <= prev => prev + 1,
            _ => millis,
        };
        self.last = Some(millis);

        AssignedId {
            id: millis.to_string(),
            submitted_at: now,
        }
    }

    pub fn assign(&mut self) -> AssignedId {
        self.assign_at(Utc::now())
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix, e.g. `2024-01-01T08:30:00.000Z`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
