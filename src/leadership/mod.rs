use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;

use crate::errors::ElectionError;

pub mod election;
pub mod keep_alive;
pub mod state_machine;


#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ElectionState {
	Following,
	Leading,
	Stopped
}

impl ElectionState {
	fn to_u8(self) -> u8 {
		match self {
			ElectionState::Following => 0,
			ElectionState::Leading => 1,
			ElectionState::Stopped => 2,
		}
	}

	fn from_u8(value: u8) -> ElectionState {
		match value {
			0 => ElectionState::Following,
			1 => ElectionState::Leading,
			_ => ElectionState::Stopped,
		}
	}
}

impl fmt::Display for ElectionState {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			ElectionState::Following => write!(f, "Following"),
			ElectionState::Leading => write!(f, "Leading"),
			ElectionState::Stopped => write!(f, "Stopped"),
		}
	}
}

/// Local leadership flag.
///
/// Written only by the election worker, read lock-free by any thread.
#[derive(Clone, Debug)]
pub struct LeadershipStatus {
	state: Arc<AtomicU8>
}

impl LeadershipStatus {
	pub fn new() -> LeadershipStatus {
		LeadershipStatus { state: Arc::new(AtomicU8::new(ElectionState::Following.to_u8())) }
	}

	pub fn state(&self) -> ElectionState {
		ElectionState::from_u8(self.state.load(Ordering::Acquire))
	}

	pub fn is_leader(&self) -> bool {
		self.state() == ElectionState::Leading
	}

	pub(crate) fn set(&self, state: ElectionState) {
		self.state.store(state.to_u8(), Ordering::Release);
	}
}

impl Default for LeadershipStatus {
	fn default() -> Self {
		LeadershipStatus::new()
	}
}

/// Why a leader went back to following.
#[derive(Clone, Debug, PartialEq)]
pub enum LossReason {
	LeaseAbsent,
	OwnerMismatch,
	StoreFailure(ElectionError),
}

impl fmt::Display for LossReason {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			LossReason::LeaseAbsent => write!(f, "lease expired"),
			LossReason::OwnerMismatch => write!(f, "lease owned by another process"),
			LossReason::StoreFailure(err) => write!(f, "renewal failed: {}", err),
		}
	}
}

/// Notifications published by the election worker.
#[derive(Clone, Debug, PartialEq)]
pub enum ElectionEvent {
	BecameLeader,
	LostLeadership(LossReason),
	AcquireFailed(ElectionError),
	Stopped,
}

/// Fans every event out to all live subscribers.
///
/// Each `subscribe` call gets its own channel that starts empty, so a late
/// subscriber sees only what happens after it subscribed and two subscribers
/// never split events between them. Subscribers that dropped their receiver
/// are pruned on the next event.
#[derive(Debug, Clone, Default)]
pub struct ElectionEvents {
	subscribers: Arc<Mutex<Vec<Sender<ElectionEvent>>>>,
}

impl ElectionEvents {
	pub fn new() -> ElectionEvents {
		ElectionEvents::default()
	}

	pub fn subscribe(&self) -> Receiver<ElectionEvent> {
		let (event_tx, event_rx): (Sender<ElectionEvent>, Receiver<ElectionEvent>) =
			crossbeam_channel::unbounded();

		self.subscribers.lock().push(event_tx);

		event_rx
	}

	pub fn notify(&self, event: ElectionEvent) {
		let mut subscribers = self.subscribers.lock();

		subscribers.retain(|event_tx| match event_tx.send(event.clone()) {
			Ok(()) => true,
			Err(_) => {
				trace!("Event subscriber is gone, dropping it");
				false
			}
		});
	}

	#[cfg(test)]
	pub fn subscriber_count(&self) -> usize {
		self.subscribers.lock().len()
	}
}
