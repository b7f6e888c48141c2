#[macro_use] extern crate log;
extern crate env_logger;
extern crate chrono;

use std::env;
use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use chrono::prelude::{DateTime, Local};

extern crate lease_election;
extern crate election_modules;

use lease_election::{Election, ElectionIdentity};
use election_modules::{RedisCoordinationStore, RedisStoreConfig};


const ELECTION_KEY: &str = "cluster_local";

fn init_logger() {
    env_logger::builder()
        .format(|buf, record| {
            let now: DateTime<Local> = Local::now();
            writeln!(buf, "{:5}: {} - {}", record.level(), now.format("%H:%M:%S.%3f").to_string(), record.args())
        })
        .init();
}

/// Usage: node [process-name] [redis-endpoint] [run-seconds]
fn main() {
    init_logger();

    let args: Vec<String> = env::args().collect();
    let process_name = args.get(1).cloned().unwrap_or_else(|| format!("process-{}", std::process::id()));
    let endpoint = args.get(2).cloned().unwrap_or_else(|| "127.0.0.1:6379".to_string());
    let run_seconds = args.get(3).and_then(|arg| arg.parse::<u64>().ok()).unwrap_or(60);

    info!("Node {} started against {}", process_name, endpoint);

    let store = match RedisCoordinationStore::new(RedisStoreConfig::simple(&endpoint, "", 0)) {
        Ok(store) => store,
        Err(err) => {
            error!("Cannot configure Redis store: {}", err);
            std::process::exit(1);
        }
    };

    let identity = match ElectionIdentity::new(ELECTION_KEY, process_name.clone()) {
        Ok(identity) => identity,
        Err(err) => {
            error!("Invalid identity: {}", err);
            std::process::exit(1);
        }
    };

    let election = Election::simple(identity, Duration::from_secs(6), store);
    if let Err(err) = election.start() {
        error!("Cannot start election: {}", err);
        std::process::exit(1);
    }

    let deadline = Instant::now() + Duration::from_secs(run_seconds);
    while Instant::now() < deadline {
        if election.is_leader() {
            println!("{} is leader", process_name);
        } else {
            println!("{} is follower", process_name);
        }
        thread::sleep(Duration::from_secs(1));
    }

    election.join();
    info!("Node {} shutting down", process_name);
}
