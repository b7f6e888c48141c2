#[macro_use]
extern crate log;
extern crate chrono;
extern crate env_logger;

extern crate cases;

use chrono::prelude::{DateTime, Local};
use std::io::Write;

fn init_logger() {
    env_logger::builder()
        .format(|buf, record| {
            let now: DateTime<Local> = Local::now();
            let now_str = now.format("%H:%M:%S.%3f").to_string();
            writeln!(buf, "{:5}: {} - {}", record.level(), now_str, record.args())
        })
        .init();
}

fn main() {
    init_logger();

    info!("Election cases started");

    cases::cases::smoke::run();
    cases::cases::mutual_exclusion::run();
    cases::cases::lease_eviction::run();
    cases::cases::store_outage::run();
    cases::cases::verify_policy::run();
    cases::cases::late_subscriber::run();

    info!("Election cases completed");
}
