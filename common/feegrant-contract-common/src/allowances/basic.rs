// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::coins;
use crate::error::FeegrantContractError;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Coin, Env, Timestamp};

/// The simplest allowance: an optional multi-asset spend limit with an optional expiry.
/// No spend limit means the grantee may spend an unbounded amount of the granter's funds
/// (until the allowance expires, if it ever does).
#[cw_serde]
pub struct BasicAllowance {
    pub spend_limit: Option<Vec<Coin>>,
    pub expiration_unix_timestamp: Option<u64>,
}

impl BasicAllowance {
    pub fn new(spend_limit: Option<Vec<Coin>>, expiration_unix_timestamp: Option<u64>) -> Self {
        BasicAllowance {
            spend_limit,
            expiration_unix_timestamp,
        }
    }

    pub fn unlimited() -> Self {
        BasicAllowance {
            spend_limit: None,
            expiration_unix_timestamp: None,
        }
    }

    pub fn is_expired(&self, block_time: Timestamp) -> bool {
        match self.expiration_unix_timestamp {
            Some(expiration) => Timestamp::from_seconds(expiration) < block_time,
            None => false,
        }
    }

    /// Attempts to charge `fee` against this allowance.
    /// `Ok(true)` means the fee was accepted and the allowance is now fully used up,
    /// `Ok(false)` means the fee was accepted and the mutated allowance must be persisted.
    /// A [`FeegrantContractError::FeeLimitExpired`] error means the caller has to remove
    /// the grant; any other error leaves the grant untouched.
    pub fn accept(&mut self, env: &Env, fee: &[Coin]) -> Result<bool, FeegrantContractError> {
        if let Some(expired_at) = self.expiration_unix_timestamp {
            if Timestamp::from_seconds(expired_at) < env.block.time {
                return Err(FeegrantContractError::FeeLimitExpired {
                    expired_at,
                    block_time: env.block.time.seconds(),
                });
            }
        }

        match &self.spend_limit {
            Some(limit) => {
                let left = coins::checked_sub(limit, fee).ok_or(
                    FeegrantContractError::FeeLimitExceeded {
                        scope: "basic allowance",
                    },
                )?;
                let exhausted = coins::is_zero(&left);
                self.spend_limit = Some(left);
                Ok(exhausted)
            }
            None => Ok(false),
        }
    }

    pub fn validate_basic(&self) -> Result<(), FeegrantContractError> {
        if let Some(limit) = &self.spend_limit {
            coins::validate(limit)?;
            if !coins::all_positive(limit) {
                return Err(FeegrantContractError::InvalidCoins {
                    reason: "spend limit must be positive".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn expires_at(&self) -> Option<u64> {
        self.expiration_unix_timestamp
    }
}
