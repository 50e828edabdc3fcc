// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::error::FeegrantContractError;
use crate::gas::GasMeter;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Coin, Env};

mod basic;
mod filtered;
mod periodic;

pub use basic::BasicAllowance;
pub use filtered::{AllowedMsgAllowance, GAS_COST_PER_ITERATION};
pub use periodic::PeriodicAllowance;

/// The policy object attached to every grant. The variant tag is part of the wire
/// and storage format, so a round trip through serialization always recovers the
/// concrete variant.
#[cw_serde]
pub enum Allowance {
    Basic(BasicAllowance),
    Periodic(PeriodicAllowance),
    AllowedMsg(AllowedMsgAllowance),
}

impl Allowance {
    /// Attempts to charge `fee`, carried by a transaction made up of `msg_type_urls`,
    /// against this allowance.
    ///
    /// - `Ok(false)`: fee accepted; the mutated allowance must be persisted again.
    /// - `Ok(true)`: fee accepted and the allowance is fully used up; the caller must
    ///   remove the surrounding grant.
    /// - `Err(FeeLimitExpired { .. })`: fee refused; the caller must still remove the
    ///   grant as it can never become usable again.
    /// - any other error: fee refused; the stored grant remains as it was.
    pub fn accept(
        &mut self,
        env: &Env,
        gas: &mut dyn GasMeter,
        fee: &[Coin],
        msg_type_urls: &[String],
    ) -> Result<bool, FeegrantContractError> {
        match self {
            Allowance::Basic(allowance) => allowance.accept(env, fee),
            Allowance::Periodic(allowance) => allowance.accept(env, fee),
            Allowance::AllowedMsg(allowance) => allowance.accept(env, gas, fee, msg_type_urls),
        }
    }

    pub fn validate_basic(&self) -> Result<(), FeegrantContractError> {
        match self {
            Allowance::Basic(allowance) => allowance.validate_basic(),
            Allowance::Periodic(allowance) => allowance.validate_basic(),
            Allowance::AllowedMsg(allowance) => allowance.validate_basic(),
        }
    }

    /// The instant at which this allowance stops being usable, if there is one.
    /// Stable across [`Allowance::accept`]; the expiry index relies on that.
    pub fn expires_at(&self) -> Option<u64> {
        match self {
            Allowance::Basic(allowance) => allowance.expires_at(),
            Allowance::Periodic(allowance) => allowance.expires_at(),
            Allowance::AllowedMsg(allowance) => allowance.expires_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::{coin, from_json, to_json_binary};

    fn variants() -> Vec<Allowance> {
        vec![
            Allowance::Basic(BasicAllowance::new(
                Some(vec![coin(555, "atom")]),
                Some(1234),
            )),
            Allowance::Periodic(PeriodicAllowance {
                basic: BasicAllowance::new(Some(vec![coin(555, "atom")]), None),
                period_seconds: 600,
                period_spend_limit: vec![coin(512, "atom")],
                period_can_spend: vec![coin(43, "atom")],
                period_reset_unix_timestamp: 1_600_000_000,
            }),
            Allowance::AllowedMsg(AllowedMsgAllowance::new(
                Allowance::Basic(BasicAllowance::unlimited()),
                vec!["/cosmos.bank.v1beta1.MsgSend".to_string()],
            )),
        ]
    }

    #[test]
    fn serialization_preserves_the_variant() -> anyhow::Result<()> {
        for allowance in variants() {
            let raw = to_json_binary(&allowance)?;
            let recovered: Allowance = from_json(&raw)?;
            assert_eq!(allowance, recovered);
        }
        Ok(())
    }

    #[test]
    fn nested_wrappers_round_trip() -> anyhow::Result<()> {
        let allowance = Allowance::AllowedMsg(AllowedMsgAllowance::new(
            Allowance::AllowedMsg(AllowedMsgAllowance::new(
                Allowance::Basic(BasicAllowance::new(Some(vec![coin(43, "atom")]), Some(99))),
                vec!["/cosmos.gov.v1.MsgVote".to_string()],
            )),
            vec!["/cosmos.bank.v1beta1.MsgSend".to_string()],
        ));

        let raw = to_json_binary(&allowance)?;
        let recovered: Allowance = from_json(&raw)?;
        assert_eq!(allowance, recovered);
        assert_eq!(recovered.expires_at(), Some(99));
        Ok(())
    }
}
