#[macro_use]
extern crate log;
extern crate lease_election;

mod memory_store;
mod redis_store;
mod verify;

pub use memory_store::MemoryCoordinationStore;
pub use redis_store::{RedisCoordinationStore, RedisStoreConfig};
pub use redis_store::{ACQUIRE_CREATED_MARKER, ACQUIRE_SCRIPT, RENEW_SCRIPT};
pub use verify::{AliasVerifier, AlwaysAcceptVerifier};
