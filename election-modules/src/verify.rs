use lease_election::{Result, VerifyPolicy};
use std::collections::HashSet;

/// Treats every existing owner as self. Useful to test rejoin semantics;
/// it gives up mutual exclusion.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct AlwaysAcceptVerifier;

impl VerifyPolicy for AlwaysAcceptVerifier {
    fn verify(&self, _local_value: &str, _remote_value: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Accepts the local value itself plus a fixed set of aliases, e.g. identity
/// strings a restarted process used before.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AliasVerifier {
    aliases: HashSet<String>,
}

impl AliasVerifier {
    pub fn new<I, A>(aliases: I) -> AliasVerifier
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        AliasVerifier {
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }
}

impl VerifyPolicy for AliasVerifier {
    fn verify(&self, local_value: &str, remote_value: &str) -> Result<bool> {
        Ok(local_value == remote_value || self.aliases.contains(remote_value))
    }
}
