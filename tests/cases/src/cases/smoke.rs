use election_modules::MemoryCoordinationStore;
use lease_election::{ElectionTimings, ExactMatchVerifier};
use std::time::Duration;

use crate::steps;

/// Two processes, the first one leads; once it stops renewing the second one
/// takes over after the lease lapses.
pub fn run() {
	let timings = ElectionTimings::with_term(Duration::from_secs(2));
	let store = MemoryCoordinationStore::new();

	let first = steps::create_election("p1", store.clone(), timings, ExactMatchVerifier);
	assert!(steps::wait_until(timings.election_interval(), || first.is_leader()), "p1 leads");

	let second = steps::create_election("p2", store.clone(), timings, ExactMatchVerifier);
	steps::sleep_ms(timings.election_interval().as_millis() as u64 + 100);

	assert!(first.is_leader());
	assert!(!second.is_leader());

	// stop renewing; the lease is left to expire
	first.join();
	assert!(!first.is_leader());

	let lease_left = store.expires_in(steps::CASE_KEY).unwrap_or_default();
	info!("--Lease left after p1 stopped: {:?}", lease_left);

	let takeover_bound = lease_left + timings.election_interval() + Duration::from_millis(300);
	assert!(steps::wait_until(takeover_bound, || second.is_leader()), "p2 takes over");
	assert_eq!(store.owner(steps::CASE_KEY), Some("p2".to_string()));

	second.join();
}
