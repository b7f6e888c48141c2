use std::fmt;
use std::time::Duration;

use crossbeam_channel::Receiver;
use parking_lot::Mutex;

use crate::common::{self, Worker};
use crate::configuration::{ElectionIdentity, ElectionTimings};
use crate::errors::{ElectionError, Result};
use crate::leadership::{ElectionEvent, ElectionEvents, ElectionState, LeadershipStatus};
use crate::leadership::state_machine::{run_election_loop, ElectionParams};
use crate::store::CoordinationStore;
use crate::verify::{ExactMatchVerifier, VerifyPolicy};

/// Lifecycle handle of one election participant.
///
/// `start` spawns the background worker, `quit` closes its terminate channel
/// and `is_leader` reads the shared flag without blocking. Dropping the handle
/// quits the worker without waiting for it.
pub struct Election<S, V = ExactMatchVerifier>
where
    S: CoordinationStore,
    V: VerifyPolicy,
{
    identity: ElectionIdentity,
    timings: ElectionTimings,
    status: LeadershipStatus,
    events: ElectionEvents,
    collaborators: Mutex<Option<(S, V)>>,
    worker: Mutex<Option<Worker>>,
}

impl<S> Election<S, ExactMatchVerifier>
where
    S: CoordinationStore,
{
    /// Term only: default intervals and exact-match verification.
    pub fn simple(identity: ElectionIdentity, term_duration: Duration, store: S) -> Election<S, ExactMatchVerifier> {
        Election::new(identity, ElectionTimings::with_term(term_duration), store, ExactMatchVerifier)
    }
}

impl<S, V> Election<S, V>
where
    S: CoordinationStore,
    V: VerifyPolicy,
{
    pub fn new(identity: ElectionIdentity, timings: ElectionTimings, store: S, verifier: V) -> Election<S, V> {
        Election {
            identity,
            timings,
            status: LeadershipStatus::new(),
            events: ElectionEvents::new(),
            collaborators: Mutex::new(Some((store, verifier))),
            worker: Mutex::new(None),
        }
    }

    /// Spawns the election worker. Only the first call has an effect.
    pub fn start(&self) -> Result<()> {
        let mut worker_slot = self.worker.lock();
        let collaborators = self.collaborators.lock().take();
        let (store, verifier) = match collaborators {
            Some(collaborators) => collaborators,
            None => {
                warn!("{} Election already started or quit", self.identity);
                return Ok(());
            }
        };

        let params = ElectionParams {
            identity: self.identity.clone(),
            timings: self.timings,
            store,
            verifier,
            status: self.status.clone(),
            events: self.events.clone(),
        };

        let worker_name = format!("election-{}", self.identity.key());
        let worker = common::run_worker(worker_name, run_election_loop, params).map_err(|err| {
            ElectionError::worker(format!("Cannot spawn election worker for {}", self.identity), err.to_string())
        })?;

        *worker_slot = Some(worker);
        info!("{} Election started with {:?}", self.identity, self.timings);

        Ok(())
    }

    /// Signals shutdown. Safe to call any number of times.
    pub fn quit(&self) {
        let never_started = self.collaborators.lock().take().is_some();
        if never_started {
            self.status.set(ElectionState::Stopped);
            self.events.notify(ElectionEvent::Stopped);
            info!("{} Election quit before start", self.identity);
            return;
        }

        if let Some(worker) = self.worker.lock().as_mut() {
            worker.terminate();
        }
    }

    /// Quits and waits until the worker has exited.
    pub fn join(&self) {
        self.quit();

        let worker = self.worker.lock().take();
        if let Some(worker) = worker {
            worker.join();
        }
    }

    pub fn is_leader(&self) -> bool {
        self.status.is_leader()
    }

    pub fn status(&self) -> ElectionState {
        self.status.state()
    }

    /// New subscription to leadership changes and contained errors. Only
    /// events raised after this call are delivered; subscribe before `start`
    /// to see the first promotion.
    pub fn events(&self) -> Receiver<ElectionEvent> {
        self.events.subscribe()
    }

    pub fn identity(&self) -> &ElectionIdentity {
        &self.identity
    }

    pub fn timings(&self) -> ElectionTimings {
        self.timings
    }
}

impl<S, V> Drop for Election<S, V>
where
    S: CoordinationStore,
    V: VerifyPolicy,
{
    fn drop(&mut self) {
        self.quit();
    }
}

impl<S, V> fmt::Debug for Election<S, V>
where
    S: CoordinationStore,
    V: VerifyPolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Election")
            .field("identity", &self.identity)
            .field("timings", &self.timings)
            .field("status", &self.status.state())
            .finish()
    }
}
