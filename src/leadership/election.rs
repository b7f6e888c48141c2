use crate::leadership::state_machine::{log_store_error, ElectionParams, Outcome};
use crate::store::{AcquireOutcome, CoordinationStore};
use crate::verify::VerifyPolicy;

/// One acquisition attempt while following.
pub fn attempt_acquire<S, V>(params: &ElectionParams<S, V>) -> Outcome
where
    S: CoordinationStore,
    V: VerifyPolicy,
{
    let key = params.identity.key();
    let value = params.identity.value();

    let acquire_result = params
        .store
        .acquire_if_absent(key, value, params.timings.term_duration());

    trace!("{} Acquire result: {:?}", params.identity, acquire_result);

    match acquire_result {
        Ok(AcquireOutcome::Created) => {
            info!("{} Lease created", params.identity);
            Outcome::Promoted
        }
        Ok(AcquireOutcome::Existing(ref owner)) if owner == value => {
            info!("{} Lease already owned by this process", params.identity);
            Outcome::Promoted
        }
        Ok(AcquireOutcome::Existing(owner)) => match params.verifier.verify(value, &owner) {
            Ok(true) => {
                info!("{} Lease owner '{}' accepted as self", params.identity, owner);
                Outcome::Promoted
            }
            Ok(false) => {
                trace!("{} Lease held by '{}'", params.identity, owner);
                Outcome::Declined
            }
            Err(err) => {
                warn!("{} Verify policy failed for owner '{}': {}", params.identity, owner, err);
                Outcome::AcquireFailed(err)
            }
        },
        Err(err) => {
            log_store_error(&params.identity, "acquire", &err);
            Outcome::AcquireFailed(err)
        }
    }
}
