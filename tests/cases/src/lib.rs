//! # Leader election test cases
//!
//! Integration scenarios for several elections contending on one
//! in-memory coordination store.

#[macro_use]
extern crate log;
mod steps;

pub use self::cases::smoke;

#[cfg(test)]
mod tests {
    use crate::cases;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn smoke() {
        init_logger();
        cases::smoke::run();
    }

    #[test]
    fn mutual_exclusion() {
        init_logger();
        cases::mutual_exclusion::run();
    }

    #[test]
    fn lease_eviction() {
        init_logger();
        cases::lease_eviction::run();
    }

    #[test]
    fn store_outage() {
        init_logger();
        cases::store_outage::run();
    }

    #[test]
    fn verify_policy() {
        init_logger();
        cases::verify_policy::run();
    }

    #[test]
    fn late_subscriber() {
        init_logger();
        cases::late_subscriber::run();
    }
}
