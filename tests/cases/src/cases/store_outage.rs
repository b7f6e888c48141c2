use lease_election::{ElectionEvent, LossReason};
use std::time::Duration;

use crate::steps;

/// A store outage demotes the leader. After recovery the old leader still owns
/// the unexpired lease and gets it back without a new election.
pub fn run() {
	let timings = steps::case_timings(4000, 200, 400);
	let mut cluster = steps::cluster::start_initial_cluster(vec!["p1"], timings);
	assert_eq!(cluster.wait_for_single_leader(Duration::from_secs(1)), "p1");

	cluster.add_election("p2");
	steps::sleep_ms(300);

	let events = cluster.election("p1").events();
	cluster.store.set_available(false);

	let demoted = steps::wait_for_event(&events, Duration::from_secs(2), |event| match event {
		ElectionEvent::LostLeadership(LossReason::StoreFailure(_)) => true,
		_ => false
	});
	assert!(demoted, "p1 steps down when renewal fails");
	assert!(cluster.leaders().is_empty());

	steps::sleep_ms(400);
	assert!(cluster.leaders().is_empty(), "nobody leads while the store is down");

	cluster.store.set_available(true);

	assert_eq!(cluster.wait_for_single_leader(Duration::from_secs(2)), "p1");
	assert_eq!(cluster.store.lease_count(), 1);

	cluster.terminate();
}
