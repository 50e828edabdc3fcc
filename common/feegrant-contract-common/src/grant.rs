// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::allowances::Allowance;
use crate::error::FeegrantContractError;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};

/// The persisted fee-grant record: `granter` lets `grantee` pay transaction fees
/// from the granter's funds, subject to the attached allowance policy.
#[cw_serde]
pub struct Grant {
    pub granter: Addr,
    pub grantee: Addr,
    pub allowance: Allowance,
    pub granted_at: Timestamp,
}

impl Grant {
    pub fn new(
        granter: Addr,
        grantee: Addr,
        allowance: Allowance,
        granted_at: Timestamp,
    ) -> Result<Grant, FeegrantContractError> {
        if granter.as_str().is_empty() {
            return Err(FeegrantContractError::InvalidAddress {
                reason: "empty granter address".to_string(),
            });
        }
        if grantee.as_str().is_empty() {
            return Err(FeegrantContractError::InvalidAddress {
                reason: "empty grantee address".to_string(),
            });
        }
        if granter == grantee {
            return Err(FeegrantContractError::SelfGrant { address: granter });
        }
        allowance.validate_basic()?;

        Ok(Grant {
            granter,
            grantee,
            allowance,
            granted_at,
        })
    }
}
