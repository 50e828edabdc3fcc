// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use super::basic::BasicAllowance;
use crate::coins;
use crate::error::FeegrantContractError;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Coin, Env, Timestamp};

/// An allowance that refills a per-period budget on top of an absolute [`BasicAllowance`]
/// ceiling. `period_can_spend` is what remains in the current period; once the block time
/// reaches `period_reset_unix_timestamp` it is refilled from `period_spend_limit` (capped
/// by whatever remains of the absolute limit) and the reset instant advances by
/// `period_seconds`.
#[cw_serde]
pub struct PeriodicAllowance {
    pub basic: BasicAllowance,
    pub period_seconds: u64,
    pub period_spend_limit: Vec<Coin>,
    pub period_can_spend: Vec<Coin>,
    pub period_reset_unix_timestamp: u64,
}

impl PeriodicAllowance {
    /// Attempts to charge `fee` against both the current period budget and the absolute
    /// limit. Same result contract as [`BasicAllowance::accept`].
    pub fn accept(&mut self, env: &Env, fee: &[Coin]) -> Result<bool, FeegrantContractError> {
        if let Some(expired_at) = self.basic.expiration_unix_timestamp {
            if Timestamp::from_seconds(expired_at) < env.block.time {
                return Err(FeegrantContractError::FeeLimitExpired {
                    expired_at,
                    block_time: env.block.time.seconds(),
                });
            }
        }

        self.try_reset_period(env.block.time);

        self.period_can_spend = coins::checked_sub(&self.period_can_spend, fee).ok_or(
            FeegrantContractError::FeeLimitExceeded {
                scope: "period limit",
            },
        )?;

        match &self.basic.spend_limit {
            Some(limit) => {
                let left = coins::checked_sub(limit, fee).ok_or(
                    FeegrantContractError::FeeLimitExceeded {
                        scope: "absolute limit",
                    },
                )?;
                let exhausted = coins::is_zero(&left);
                self.basic.spend_limit = Some(left);
                Ok(exhausted)
            }
            None => Ok(false),
        }
    }

    /// Refills `period_can_spend` and advances the reset instant if the current period
    /// has elapsed. No-op otherwise.
    fn try_reset_period(&mut self, block_time: Timestamp) {
        if block_time < Timestamp::from_seconds(self.period_reset_unix_timestamp) {
            return;
        }

        // the refill is the period limit, unless the remaining absolute limit can no
        // longer cover a full period, in which case whatever remains becomes the refill
        self.period_can_spend = match &self.basic.spend_limit {
            Some(limit)
                if !limit.is_empty()
                    && coins::checked_sub(limit, &self.period_spend_limit).is_none() =>
            {
                limit.clone()
            }
            _ => self.period_spend_limit.clone(),
        };

        // a long stretch of inactivity may have left the reset instant several periods
        // in the past; never schedule the next reset at or before the current block
        self.period_reset_unix_timestamp += self.period_seconds;
        if self.period_reset_unix_timestamp <= block_time.seconds() {
            self.period_reset_unix_timestamp = block_time.seconds() + self.period_seconds;
        }
    }

    pub fn validate_basic(&self) -> Result<(), FeegrantContractError> {
        self.basic.validate_basic()?;

        coins::validate(&self.period_spend_limit)?;
        if !coins::all_positive(&self.period_spend_limit) {
            return Err(FeegrantContractError::InvalidCoins {
                reason: "period spend limit must be positive".to_string(),
            });
        }

        // zero is fine for what's left in the current period
        coins::validate(&self.period_can_spend)?;

        if let Some(limit) = &self.basic.spend_limit {
            if !coins::denoms_subset_of(&self.period_spend_limit, limit) {
                return Err(FeegrantContractError::InvalidDuration {
                    reason: "period spend limit has different currency than basic spend limit"
                        .to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn expires_at(&self) -> Option<u64> {
        self.basic.expiration_unix_timestamp
    }
}
