use std::fmt;
use std::time::Duration;

use crate::errors::{ElectionError, Result};

/// Wire code returned by the renew script when the lease is absent.
pub const RENEW_CODE_ABSENT: i64 = 0;
/// Wire code returned by the renew script when the expiry was extended.
pub const RENEW_CODE_RENEWED: i64 = 1;
/// Wire code returned by the renew script when another owner holds the lease.
pub const RENEW_CODE_OWNER_MISMATCH: i64 = 2;

/// Result of an acquire-if-absent call.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum AcquireOutcome {
    /// No lease existed; one was created with this caller as owner.
    Created,
    /// A lease exists; it was left untouched. Carries the current owner.
    Existing(String),
}

/// Result of a renew-if-owned call.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum RenewOutcome {
    Renewed,
    Absent,
    OwnerMismatch,
}

impl RenewOutcome {
    /// Decodes the renew script reply. Unknown codes are a contract breach.
    pub fn from_code(code: i64) -> Result<RenewOutcome> {
        match code {
            RENEW_CODE_ABSENT => Ok(RenewOutcome::Absent),
            RENEW_CODE_RENEWED => Ok(RenewOutcome::Renewed),
            RENEW_CODE_OWNER_MISMATCH => Ok(RenewOutcome::OwnerMismatch),
            unknown => Err(ElectionError::protocol_violation(
                format!("Unexpected renew reply code: {}", unknown),
                String::new(),
            )),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            RenewOutcome::Absent => RENEW_CODE_ABSENT,
            RenewOutcome::Renewed => RENEW_CODE_RENEWED,
            RenewOutcome::OwnerMismatch => RENEW_CODE_OWNER_MISMATCH,
        }
    }
}

impl fmt::Display for RenewOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenewOutcome::Renewed => write!(f, "renewed"),
            RenewOutcome::Absent => write!(f, "absent"),
            RenewOutcome::OwnerMismatch => write!(f, "owner mismatch"),
        }
    }
}

/// Atomic lease operations against the coordination service.
///
/// Each call must execute as one indivisible operation on the service side,
/// with respect to every other caller in any process. Transport failures are
/// reported as `StoreUnavailable`; replies outside the result set as
/// `ProtocolViolation`.
pub trait CoordinationStore: Send + 'static {
    /// Creates the lease at `key` owned by `value` with expiry `ttl` unless one
    /// exists. An existing lease is returned as is.
    fn acquire_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<AcquireOutcome>;

    /// Extends the lease expiry to `ttl` from now when `expected_value` owns it.
    fn renew_if_owned(&self, key: &str, expected_value: &str, ttl: Duration) -> Result<RenewOutcome>;

    /// Current owner, for diagnostics only.
    fn read(&self, key: &str) -> Result<Option<String>>;
}
