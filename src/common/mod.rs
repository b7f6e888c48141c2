use std::io;
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TryRecvError};

/// Background thread plus the sending half of its terminate channel.
///
/// Termination is signalled by closing the channel: dropping the sender
/// disconnects every receiver at once, so the worker sees it wherever it waits.
#[derive(Debug)]
pub struct Worker {
	pub join_handle : JoinHandle<()>,
	terminate_worker_tx : Option<Sender<()>>
}

pub fn run_worker<T: Send + 'static, F: FnOnce(T, Receiver<()>) + Send + 'static>(name : String, worker : F, params : T) -> io::Result<Worker> {
	let (terminate_worker_tx, terminate_worker_rx): (Sender<()>, Receiver<()>) = crossbeam_channel::bounded(0);

	let join_handle = thread::Builder::new()
		.name(name)
		.spawn(move|| worker (params, terminate_worker_rx))?;

	Ok(Worker{join_handle, terminate_worker_tx: Some(terminate_worker_tx)})
}

impl Worker {
	/// Closes the terminate channel. Repeated calls are no-ops.
	pub fn terminate(&mut self) {
		if self.terminate_worker_tx.take().is_none() {
			trace!("Worker termination already requested");
		}
	}

	pub fn join(self) {
		let thread_name = self.join_handle.thread().name().map(str::to_string);
		let join_result = self.join_handle.join();
		if join_result.is_err() {
			error!("Worker {:?} panicked", thread_name)
		}
	}
}

/// Result of waiting on the terminate channel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WaitResult {
	Elapsed,
	Terminated
}

/// Sleeps for `timeout` unless termination is signalled first.
pub fn wait_or_terminate(terminate_worker_rx : &Receiver<()>, timeout : Duration) -> WaitResult {
	let timer = crossbeam_channel::after(timeout);
	select!(
		recv(terminate_worker_rx) -> res => {
			if res.is_ok() {
				trace!("Explicit termination message received");
			}
			WaitResult::Terminated
		},
		recv(timer) -> _ => WaitResult::Elapsed,
	)
}

/// Non-blocking check used right after a store call returns.
pub fn termination_requested(terminate_worker_rx : &Receiver<()>) -> bool {
	match terminate_worker_rx.try_recv() {
		Ok(()) | Err(TryRecvError::Disconnected) => true,
		Err(TryRecvError::Empty) => false
	}
}
