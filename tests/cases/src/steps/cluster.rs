use election_modules::MemoryCoordinationStore;
use lease_election::{Election, ElectionTimings, ExactMatchVerifier};
use std::time::Duration;

use crate::steps;

/// Several elections contending for `CASE_KEY` on one in-memory store.
pub struct CaseCluster {
	pub store: MemoryCoordinationStore,
	pub timings: ElectionTimings,
	pub elections: Vec<Election<MemoryCoordinationStore>>
}

pub fn start_initial_cluster(values: Vec<&str>, timings: ElectionTimings) -> CaseCluster {
	let store = MemoryCoordinationStore::new();
	let mut cluster = CaseCluster {
		store,
		timings,
		elections: Vec::new()
	};

	for value in values {
		cluster.add_election(value);
	}

	cluster
}

impl CaseCluster {
	pub fn add_election(&mut self, value: &str) {
		let election = steps::create_election(value, self.store.clone(), self.timings, ExactMatchVerifier);

		self.elections.push(election);
	}

	pub fn election(&self, value: &str) -> &Election<MemoryCoordinationStore> {
		self.elections.iter()
			.find(|election| election.identity().value() == value)
			.unwrap_or_else(|| panic!("no election with value {}", value))
	}

	pub fn leaders(&self) -> Vec<String> {
		self.elections.iter()
			.filter(|election| election.is_leader())
			.map(|election| election.identity().value().to_string())
			.collect()
	}

	/// Waits until exactly one election reports leadership and returns its value.
	pub fn wait_for_single_leader(&self, timeout: Duration) -> String {
		steps::wait_until(timeout, || self.leaders().len() == 1);

		let leaders = self.leaders();
		if leaders.len() != 1 {
			panic!("cannot get a single leader, leaders: {:?}", leaders);
		}

		let leader = leaders[0].clone();
		info!("--Leader: {}", leader);

		leader
	}

	pub fn terminate(self) {
		for election in &self.elections {
			election.quit();
		}
		for election in &self.elections {
			election.join();
		}
	}
}
