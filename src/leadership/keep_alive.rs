use crate::leadership::LossReason;
use crate::leadership::state_machine::{log_store_error, ElectionParams, Outcome};
use crate::store::{CoordinationStore, RenewOutcome};
use crate::verify::VerifyPolicy;

/// One renewal attempt while leading. Anything but `Renewed` demotes.
pub fn attempt_renew<S, V>(params: &ElectionParams<S, V>) -> Outcome
where
    S: CoordinationStore,
    V: VerifyPolicy,
{
    let renew_result = params.store.renew_if_owned(
        params.identity.key(),
        params.identity.value(),
        params.timings.term_duration(),
    );

    trace!("{} Renew result: {:?}", params.identity, renew_result);

    match renew_result {
        Ok(RenewOutcome::Renewed) => Outcome::Retained,
        Ok(RenewOutcome::Absent) => {
            info!("{} Lease expired before renewal", params.identity);
            Outcome::Demoted(LossReason::LeaseAbsent)
        }
        Ok(RenewOutcome::OwnerMismatch) => Outcome::Demoted(LossReason::OwnerMismatch),
        Err(err) => {
            log_store_error(&params.identity, "renew", &err);
            Outcome::Demoted(LossReason::StoreFailure(err))
        }
    }
}
