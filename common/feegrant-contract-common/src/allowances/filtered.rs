// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use super::Allowance;
use crate::error::FeegrantContractError;
use crate::gas::GasMeter;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Coin, Env};
use std::collections::BTreeSet;

/// Gas charged for every entry visited while matching transaction messages against
/// the allowed set, so that oversized filter lists are paid for by the transaction.
pub const GAS_COST_PER_ITERATION: u64 = 10;

/// Wraps any other allowance and restricts it to an explicit set of message types.
/// The filter runs first; only a transaction made up entirely of allowed messages
/// is forwarded to the wrapped allowance.
#[cw_serde]
pub struct AllowedMsgAllowance {
    pub inner: Box<Allowance>,
    pub allowed_messages: Vec<String>,
}

impl AllowedMsgAllowance {
    pub fn new(inner: Allowance, allowed_messages: Vec<String>) -> Self {
        AllowedMsgAllowance {
            inner: Box::new(inner),
            allowed_messages,
        }
    }

    /// Same result contract as [`super::BasicAllowance::accept`]; the wrapped
    /// allowance is mutated in place, so persisting `self` persists its decision.
    pub fn accept(
        &mut self,
        env: &Env,
        gas: &mut dyn GasMeter,
        fee: &[Coin],
        msg_type_urls: &[String],
    ) -> Result<bool, FeegrantContractError> {
        if let Some(msg_type_url) = self.first_disallowed_message(gas, msg_type_urls)? {
            return Err(FeegrantContractError::MessageNotAllowed { msg_type_url });
        }

        self.inner.accept(env, gas, fee, msg_type_urls)
    }

    fn first_disallowed_message(
        &self,
        gas: &mut dyn GasMeter,
        msg_type_urls: &[String],
    ) -> Result<Option<String>, FeegrantContractError> {
        let mut allowed = BTreeSet::new();
        for msg in &self.allowed_messages {
            gas.consume(GAS_COST_PER_ITERATION, "check msg")?;
            allowed.insert(msg.as_str());
        }

        for msg in msg_type_urls {
            gas.consume(GAS_COST_PER_ITERATION, "check msg")?;
            if !allowed.contains(msg.as_str()) {
                return Ok(Some(msg.clone()));
            }
        }

        Ok(None)
    }

    pub fn validate_basic(&self) -> Result<(), FeegrantContractError> {
        if self.allowed_messages.is_empty() {
            return Err(FeegrantContractError::NoMessages);
        }
        self.inner.validate_basic()
    }

    pub fn expires_at(&self) -> Option<u64> {
        self.inner.expires_at()
    }
}
