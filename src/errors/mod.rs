use std::error::Error;
use core::fmt;

use derive_more::Display;

/// Error classes the election loop tells apart.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash)]
pub enum ElectionErrorKind {
	/// Transport or service failure. Transient, retried at the polling cadence.
	#[display(fmt = "store unavailable")]
	StoreUnavailable,
	/// The pluggable verify policy failed.
	#[display(fmt = "verify policy error")]
	VerifyPolicy,
	/// The store returned a value outside the documented result set.
	#[display(fmt = "protocol violation")]
	ProtocolViolation,
	/// Invalid identity, timings or adapter settings.
	#[display(fmt = "misconfigured")]
	Misconfigured,
	/// The background worker thread could not be spawned.
	#[display(fmt = "worker error")]
	Worker,
}

#[derive (Clone, Debug, PartialEq)]
pub struct ElectionError {
	kind: ElectionErrorKind,
	text : String,
	cause: String
}

pub type Result<T> = std::result::Result<T, ElectionError>;

impl ElectionError {
	pub fn new(kind: ElectionErrorKind, text : String, cause : String) -> ElectionError {
		ElectionError { kind, text, cause }
	}

	pub fn store_unavailable(text : String, cause : String) -> ElectionError {
		ElectionError::new(ElectionErrorKind::StoreUnavailable, text, cause)
	}

	pub fn verify_policy(text : String, cause : String) -> ElectionError {
		ElectionError::new(ElectionErrorKind::VerifyPolicy, text, cause)
	}

	pub fn protocol_violation(text : String, cause : String) -> ElectionError {
		ElectionError::new(ElectionErrorKind::ProtocolViolation, text, cause)
	}

	pub fn misconfigured(text : String, cause : String) -> ElectionError {
		ElectionError::new(ElectionErrorKind::Misconfigured, text, cause)
	}

	pub fn worker(text : String, cause : String) -> ElectionError {
		ElectionError::new(ElectionErrorKind::Worker, text, cause)
	}

	pub fn kind(&self) -> ElectionErrorKind {
		self.kind
	}

	/// Transport failures and contract breaches of the store.
	pub fn is_store_failure(&self) -> bool {
		match self.kind {
			ElectionErrorKind::StoreUnavailable | ElectionErrorKind::ProtocolViolation => true,
			_ => false
		}
	}
}

impl fmt::Display for ElectionError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let cause_word = {
			if !self.cause.is_empty() {
				" Cause: ".to_string()
			} else {
				String::new()
			}
		};
		write!(f, "{}: {}.{}{}", self.kind, self.text, cause_word, self.cause)
	}
}

impl Error for ElectionError {}
