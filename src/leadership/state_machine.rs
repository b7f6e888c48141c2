use std::time::Duration;

use crossbeam_channel::Receiver;

use crate::common::{self, WaitResult};
use crate::configuration::{ElectionIdentity, ElectionTimings};
use crate::errors::{ElectionError, ElectionErrorKind};
use crate::leadership::{ElectionEvent, ElectionEvents, ElectionState, LeadershipStatus, LossReason};
use crate::leadership::election::attempt_acquire;
use crate::leadership::keep_alive::attempt_renew;
use crate::store::CoordinationStore;
use crate::verify::VerifyPolicy;

pub struct ElectionParams<S, V>
where
    S: CoordinationStore,
    V: VerifyPolicy,
{
    pub identity: ElectionIdentity,
    pub timings: ElectionTimings,
    pub store: S,
    pub verifier: V,
    pub status: LeadershipStatus,
    pub events: ElectionEvents,
}

/// Result of one acquisition or renewal attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Following -> Leading.
    Promoted,
    /// Leading -> Leading.
    Retained,
    /// Following -> Following, the lease belongs to someone else.
    Declined,
    /// Following -> Following, the attempt itself failed.
    AcquireFailed(ElectionError),
    /// Leading -> Following.
    Demoted(LossReason),
}

impl Outcome {
    pub fn next_state(&self) -> ElectionState {
        match self {
            Outcome::Promoted | Outcome::Retained => ElectionState::Leading,
            Outcome::Declined | Outcome::AcquireFailed(_) | Outcome::Demoted(_) => {
                ElectionState::Following
            }
        }
    }

    /// Pause before the next attempt. A demoted node polls again at once.
    pub fn wait(&self, timings: &ElectionTimings) -> Option<Duration> {
        match self {
            Outcome::Promoted | Outcome::Retained => Some(timings.keep_alive_interval()),
            Outcome::Declined | Outcome::AcquireFailed(_) => Some(timings.election_interval()),
            Outcome::Demoted(_) => None,
        }
    }
}

pub fn run_election_loop<S, V>(params: ElectionParams<S, V>, terminate_worker_rx: Receiver<()>)
where
    S: CoordinationStore,
    V: VerifyPolicy,
{
    info!("Election worker started for {}", params.identity);

    let mut state = ElectionState::Following;
    loop {
        let outcome = match state {
            ElectionState::Following => attempt_acquire(&params),
            ElectionState::Leading => attempt_renew(&params),
            ElectionState::Stopped => break,
        };

        if common::termination_requested(&terminate_worker_rx) {
            break;
        }

        state = apply_outcome(&params, state, &outcome);

        if let Some(wait) = outcome.wait(&params.timings) {
            if common::wait_or_terminate(&terminate_worker_rx, wait) == WaitResult::Terminated {
                break;
            }
        }
    }

    params.status.set(ElectionState::Stopped);
    params.events.notify(ElectionEvent::Stopped);

    info!("Election worker stopped for {}", params.identity);
}

/// Publishes the outcome. The status flag is written before anything else.
pub(crate) fn apply_outcome<S, V>(
    params: &ElectionParams<S, V>,
    current: ElectionState,
    outcome: &Outcome,
) -> ElectionState
where
    S: CoordinationStore,
    V: VerifyPolicy,
{
    let next = outcome.next_state();
    if next != current {
        params.status.set(next);
        info!("{} Status changed to {}", params.identity, next);
    }

    match outcome {
        Outcome::Promoted => params.events.notify(ElectionEvent::BecameLeader),
        Outcome::Demoted(reason) => {
            if let LossReason::OwnerMismatch = reason {
                log_current_owner(params);
            }
            params.events.notify(ElectionEvent::LostLeadership(reason.clone()))
        }
        Outcome::AcquireFailed(err) => params.events.notify(ElectionEvent::AcquireFailed(err.clone())),
        Outcome::Retained | Outcome::Declined => {}
    }

    next
}

fn log_current_owner<S, V>(params: &ElectionParams<S, V>)
where
    S: CoordinationStore,
    V: VerifyPolicy,
{
    match params.store.read(params.identity.key()) {
        Ok(Some(owner)) => info!("{} Lease taken over by '{}'", params.identity, owner),
        Ok(None) => info!("{} Lease taken over and already released", params.identity),
        Err(err) => info!("{} Lease taken over, owner unknown: {}", params.identity, err),
    }
}

/// Unavailability is routine and only warned about. Contract breaches and
/// errors outside the store failure class are logged loudly.
pub(crate) fn log_store_error(identity: &ElectionIdentity, operation: &str, err: &ElectionError) {
    if err.kind() == ElectionErrorKind::ProtocolViolation {
        error!("{} Store broke the {} contract: {}", identity, operation, err);
    } else if err.is_store_failure() {
        warn!("{} {} failed: {}", identity, operation, err);
    } else {
        error!("{} Store rejected {}: {}", identity, operation, err);
    }
}
