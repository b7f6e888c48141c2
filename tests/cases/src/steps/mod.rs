use election_modules::MemoryCoordinationStore;
use lease_election::{Election, ElectionEvent, ElectionIdentity, ElectionTimings, VerifyPolicy};
use crossbeam_channel::Receiver;
use std::thread;
use std::time::{Duration, Instant};

pub mod cluster;

pub const CASE_KEY: &str = "cl";

pub fn sleep_ms(milliseconds: u64) {
	thread::sleep(Duration::from_millis(milliseconds));
}

pub fn case_timings(term_ms: u64, election_ms: u64, keep_alive_ms: u64) -> ElectionTimings {
	ElectionTimings::new(Duration::from_millis(term_ms),
						 Duration::from_millis(election_ms),
						 Duration::from_millis(keep_alive_ms))
		.expect("valid case timings")
}

/// Built but not started, so callers can subscribe to events first.
pub fn new_election<V>(value: &str, store: MemoryCoordinationStore, timings: ElectionTimings, verifier: V)
	-> Election<MemoryCoordinationStore, V>
	where V: VerifyPolicy {
	let identity = ElectionIdentity::new(CASE_KEY, value).expect("valid identity");

	Election::new(identity, timings, store, verifier)
}

pub fn create_election<V>(value: &str, store: MemoryCoordinationStore, timings: ElectionTimings, verifier: V)
	-> Election<MemoryCoordinationStore, V>
	where V: VerifyPolicy {
	let election = new_election(value, store, timings, verifier);

	election.start().expect("can start election");

	election
}

/// Polls `condition` every 10 ms until it holds or `timeout` elapses.
pub fn wait_until<F>(timeout: Duration, condition: F) -> bool
	where F: Fn() -> bool {
	let deadline = Instant::now() + timeout;
	while Instant::now() < deadline {
		if condition() {
			return true;
		}
		sleep_ms(10);
	}

	condition()
}

pub fn wait_for_event<F>(event_rx: &Receiver<ElectionEvent>, timeout: Duration, matches: F) -> bool
	where F: Fn(&ElectionEvent) -> bool {
	let deadline = Instant::now() + timeout;
	loop {
		let now = Instant::now();
		if now >= deadline {
			return false;
		}

		match event_rx.recv_timeout(deadline - now) {
			Ok(event) => {
				trace!("Case event: {:?}", event);
				if matches(&event) {
					return true;
				}
			},
			Err(_) => return false
		}
	}
}
