#![warn(missing_debug_implementations, unsafe_code)]

//! Lease-based leader election over a key-value coordination service.
//!
//! Every participant runs one background worker that polls the store with an
//! atomic acquire-if-absent call while following and renews the lease with an
//! atomic renew-if-owned call while leading. Mutual exclusion comes entirely
//! from the store's atomicity.

#[macro_use] extern crate log;
#[macro_use] extern crate crossbeam_channel;


mod common;
mod configuration;
mod election;
mod errors;
mod leadership;
mod store;
mod verify;


pub use configuration::{ElectionIdentity, ElectionTimings, DEFAULT_TERM_DURATION};
pub use election::Election;
pub use errors::{ElectionError, ElectionErrorKind, Result};
pub use leadership::{ElectionEvent, ElectionState, LossReason};
pub use store::{AcquireOutcome, CoordinationStore, RenewOutcome};
pub use store::{RENEW_CODE_ABSENT, RENEW_CODE_OWNER_MISMATCH, RENEW_CODE_RENEWED};
pub use verify::{ExactMatchVerifier, VerifyPolicy};
