use std::fmt;
use std::time::Duration;

use crate::errors::{ElectionError, Result};

/// Term used when the caller passes a zero term duration.
pub const DEFAULT_TERM_DURATION: Duration = Duration::from_secs(6);

/// The contested key and this process's claim on it.
///
/// Uniqueness of `value` across processes is the caller's responsibility.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElectionIdentity {
    key: String,
    value: String,
}

impl ElectionIdentity {
    pub fn new<K: Into<String>, V: Into<String>>(key: K, value: V) -> Result<ElectionIdentity> {
        let key = key.into();
        let value = value.into();

        if key.is_empty() {
            return Err(ElectionError::misconfigured(
                "Election key cannot be empty".to_string(),
                String::new(),
            ));
        }
        if value.is_empty() {
            return Err(ElectionError::misconfigured(
                format!("Election value cannot be empty. Key: {}", key),
                String::new(),
            ));
        }

        Ok(ElectionIdentity { key, value })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ElectionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Lease term and the two polling cadences derived from it.
///
/// A live leader renews at least once per term and a follower polls at least
/// twice per term.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ElectionTimings {
    term_duration: Duration,
    election_interval: Duration,
    keep_alive_interval: Duration,
}

impl Default for ElectionTimings {
    fn default() -> Self {
        ElectionTimings::with_term(DEFAULT_TERM_DURATION)
    }
}

impl ElectionTimings {
    /// Zero durations are replaced with defaults: the term with
    /// `DEFAULT_TERM_DURATION`, the election interval with a third of the term
    /// and the keep-alive interval with half of it.
    pub fn new(
        term_duration: Duration,
        election_interval: Duration,
        keep_alive_interval: Duration,
    ) -> Result<ElectionTimings> {
        let term_duration = if term_duration == Duration::from_secs(0) {
            DEFAULT_TERM_DURATION
        } else {
            term_duration
        };

        let election_interval = if election_interval == Duration::from_secs(0) {
            term_duration / 3
        } else {
            election_interval
        };

        let keep_alive_interval = if keep_alive_interval == Duration::from_secs(0) {
            term_duration / 2
        } else {
            keep_alive_interval
        };

        if election_interval > term_duration / 2 {
            return Err(ElectionError::misconfigured(
                format!(
                    "Election interval {:?} exceeds half of the term {:?}",
                    election_interval, term_duration
                ),
                String::new(),
            ));
        }
        if keep_alive_interval > term_duration {
            return Err(ElectionError::misconfigured(
                format!(
                    "Keep-alive interval {:?} exceeds the term {:?}",
                    keep_alive_interval, term_duration
                ),
                String::new(),
            ));
        }

        Ok(ElectionTimings {
            term_duration,
            election_interval,
            keep_alive_interval,
        })
    }

    /// Term only, both intervals defaulted.
    pub fn with_term(term_duration: Duration) -> ElectionTimings {
        let term_duration = if term_duration == Duration::from_secs(0) {
            DEFAULT_TERM_DURATION
        } else {
            term_duration
        };

        ElectionTimings {
            term_duration,
            election_interval: term_duration / 3,
            keep_alive_interval: term_duration / 2,
        }
    }

    pub fn term_duration(&self) -> Duration {
        self.term_duration
    }

    pub fn election_interval(&self) -> Duration {
        self.election_interval
    }

    pub fn keep_alive_interval(&self) -> Duration {
        self.keep_alive_interval
    }
}
