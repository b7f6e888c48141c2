use crate::errors::Result;

/// Decides whether an existing lease owner that differs from the local value
/// as a raw string should still count as this process.
///
/// Called inline on the acquisition path: keep it pure and fast. An error
/// means "not leader this round".
pub trait VerifyPolicy: Send + 'static {
    fn verify(&self, local_value: &str, remote_value: &str) -> Result<bool>;
}

/// Default policy: exact string equality.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct ExactMatchVerifier;

impl VerifyPolicy for ExactMatchVerifier {
    fn verify(&self, local_value: &str, remote_value: &str) -> Result<bool> {
        Ok(local_value == remote_value)
    }
}

impl<F> VerifyPolicy for F
where
    F: Fn(&str, &str) -> Result<bool> + Send + 'static,
{
    fn verify(&self, local_value: &str, remote_value: &str) -> Result<bool> {
        self(local_value, remote_value)
    }
}
