//! Randomness oracle interface.
//!
//! The oracle is an external contract. The circle only asks it whether it is
//! ready and for an index below a bound; it never falls back to ledger
//! sequence, timestamps or any other transaction metadata.

use soroban_sdk::{contractclient, Address, Env};

use crate::errors::ContractError;

/// Interface an oracle contract must expose.
#[contractclient(name = "RandomnessOracleClient")]
pub trait RandomnessOracle {
    /// Whether the oracle currently has a valid randomness value.
    fn validate(env: Env) -> bool;

    /// An unbiased index in `0..max`.
    fn get_random_index(env: Env, max: u64) -> u64;
}

/// Capability the winner draw consumes.
pub trait RandomnessSource {
    fn validate(&self) -> bool;
    fn get_random_index(&self, max: u64) -> Option<u64>;
}

/// [`RandomnessSource`] backed by an on-chain oracle contract.
///
/// A trapped oracle invocation is reported as "not ready" instead of
/// aborting the caller.
pub struct OracleRandomness<'a> {
    client: RandomnessOracleClient<'a>,
}

impl<'a> OracleRandomness<'a> {
    pub fn new(env: &Env, oracle: &Address) -> Self {
        Self {
            client: RandomnessOracleClient::new(env, oracle),
        }
    }
}

impl RandomnessSource for OracleRandomness<'_> {
    fn validate(&self) -> bool {
        matches!(self.client.try_validate(), Ok(Ok(true)))
    }

    fn get_random_index(&self, max: u64) -> Option<u64> {
        match self.client.try_get_random_index(&max) {
            Ok(Ok(index)) => Some(index),
            _ => None,
        }
    }
}

/// Draw an index in `0..max`, failing closed.
pub(crate) fn draw_index<R: RandomnessSource>(source: &R, max: u64) -> Result<u64, ContractError> {
    if !source.validate() {
        return Err(ContractError::RandomnessUnavailable);
    }

    match source.get_random_index(max) {
        Some(index) if index < max => Ok(index),
        _ => Err(ContractError::RandomnessUnavailable),
    }
}

#[cfg(test)]
pub(crate) mod testutils {
    use super::RandomnessSource;

    /// In-process source returning a preset answer.
    pub struct FixedRandomness {
        pub ready: bool,
        pub index: Option<u64>,
    }

    impl FixedRandomness {
        pub fn at(index: u64) -> Self {
            Self {
                ready: true,
                index: Some(index),
            }
        }

        pub fn unavailable() -> Self {
            Self {
                ready: false,
                index: None,
            }
        }
    }

    impl RandomnessSource for FixedRandomness {
        fn validate(&self) -> bool {
            self.ready
        }

        fn get_random_index(&self, _max: u64) -> Option<u64> {
            self.index
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testutils::FixedRandomness;
    use super::*;

    #[test]
    fn test_draw_index_within_bound() {
        assert_eq!(draw_index(&FixedRandomness::at(2), 3), Ok(2));
    }

    #[test]
    fn test_draw_index_not_ready() {
        assert_eq!(
            draw_index(&FixedRandomness::unavailable(), 3),
            Err(ContractError::RandomnessUnavailable)
        );
    }

    #[test]
    fn test_draw_index_out_of_range() {
        assert_eq!(
            draw_index(&FixedRandomness::at(3), 3),
            Err(ContractError::RandomnessUnavailable)
        );
    }

    #[test]
    fn test_draw_index_missing_value() {
        let source = FixedRandomness {
            ready: true,
            index: None,
        };
        assert_eq!(
            draw_index(&source, 3),
            Err(ContractError::RandomnessUnavailable)
        );
    }
}
