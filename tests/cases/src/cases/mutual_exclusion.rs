use std::time::{Duration, Instant};

use crate::steps;
use crate::steps::cluster::CaseCluster;

fn assert_at_most_one_leader_for(cluster: &CaseCluster, period: Duration) {
	let deadline = Instant::now() + period;
	while Instant::now() < deadline {
		let leaders = cluster.leaders();
		assert!(leaders.len() <= 1, "split brain: {:?}", leaders);
		steps::sleep_ms(5);
	}
}

/// Four processes on one key never report two leaders at once, including
/// across a leader hand-over.
pub fn run() {
	let timings = steps::case_timings(900, 150, 300);
	let cluster = steps::cluster::start_initial_cluster(vec!["p1", "p2", "p3", "p4"], timings);

	let old_leader = cluster.wait_for_single_leader(Duration::from_secs(2));
	assert_at_most_one_leader_for(&cluster, Duration::from_millis(1500));

	cluster.election(&old_leader).quit();

	let deadline = Instant::now() + Duration::from_secs(3);
	let mut new_leader = None;
	while Instant::now() < deadline && new_leader.is_none() {
		let leaders = cluster.leaders();
		assert!(leaders.len() <= 1, "split brain during hand-over: {:?}", leaders);
		new_leader = leaders.into_iter().next();
		steps::sleep_ms(5);
	}

	let new_leader = new_leader.expect("a new leader is elected");
	assert_ne!(new_leader, old_leader);
	assert_at_most_one_leader_for(&cluster, Duration::from_millis(500));

	cluster.terminate();
}
