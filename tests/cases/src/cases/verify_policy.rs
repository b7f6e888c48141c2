use election_modules::{AliasVerifier, AlwaysAcceptVerifier, MemoryCoordinationStore};
use lease_election::{CoordinationStore, ElectionEvent, ExactMatchVerifier};
use std::time::Duration;

use crate::steps;

pub fn run() {
	accept_everything();
	known_alias();
}

/// An accept-all policy promotes on an existing lease without writing a new one.
fn accept_everything() {
	let timings = steps::case_timings(3000, 100, 1000);
	let store = MemoryCoordinationStore::new();

	let owner = steps::create_election("p1", store.clone(), timings, ExactMatchVerifier);
	assert!(steps::wait_until(Duration::from_secs(1), || owner.is_leader()));

	let rejoining = steps::new_election("p2", store.clone(), timings, AlwaysAcceptVerifier);
	let events = rejoining.events();
	rejoining.start().expect("can start election");
	assert!(steps::wait_for_event(&events, Duration::from_secs(1), |event| *event == ElectionEvent::BecameLeader));

	assert_eq!(store.lease_count(), 1);
	assert_eq!(store.owner(steps::CASE_KEY), Some("p1".to_string()));

	rejoining.join();
	owner.join();
}

/// A lease left behind under a previous identity counts as self for the
/// process that knows the alias, and only for it.
fn known_alias() {
	let timings = steps::case_timings(3000, 100, 1000);
	let store = MemoryCoordinationStore::new();
	store.acquire_if_absent(steps::CASE_KEY, "p1-old", Duration::from_secs(10)).expect("can seed lease");

	let stranger = steps::create_election("p2", store.clone(), timings, ExactMatchVerifier);
	let restarted = steps::new_election("p1", store.clone(), timings, AliasVerifier::new(vec!["p1-old"]));
	let events = restarted.events();
	restarted.start().expect("can start election");
	assert!(steps::wait_for_event(&events, Duration::from_secs(1), |event| *event == ElectionEvent::BecameLeader));

	steps::sleep_ms(300);
	assert!(!stranger.is_leader());
	assert_eq!(store.owner(steps::CASE_KEY), Some("p1-old".to_string()));

	restarted.join();
	stranger.join();
}
