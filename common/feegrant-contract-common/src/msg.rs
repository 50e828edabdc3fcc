// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::allowances::Allowance;
use crate::grant::Grant;
use crate::types::{GranteeAddress, GranterAddress};
use cosmwasm_schema::cw_serde;

#[cfg(feature = "schema")]
use crate::response::{
    AllowanceResponse, AllowancesByGranterPagedResponse, AllowancesPagedResponse,
};

#[cw_serde]
pub struct InstantiateMsg {
    /// The initial set of grants, usually carried over from a prior chain export.
    #[serde(default)]
    pub allowances: Vec<Grant>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Attempt to grant a fee allowance to the provided grantee.
    /// The message sender becomes the granter.
    GrantAllowance {
        grantee: GranteeAddress,
        allowance: Box<Allowance>,
    },

    /// Attempt to revoke the fee allowance the sender previously granted to the grantee.
    RevokeAllowance { grantee: GranteeAddress },

    /// Remove a batch of grants whose allowances have expired. Anyone may call this.
    PruneAllowances {},
}

#[cw_serde]
#[cfg_attr(feature = "schema", derive(cosmwasm_schema::QueryResponses))]
pub enum QueryMsg {
    /// Returns the exact grant between the provided granter and grantee.
    #[cfg_attr(feature = "schema", returns(AllowanceResponse))]
    Allowance {
        granter: GranterAddress,
        grantee: GranteeAddress,
    },

    /// Returns (paged) grants made out to the provided grantee.
    #[cfg_attr(feature = "schema", returns(AllowancesPagedResponse))]
    AllowancesPaged {
        grantee: GranteeAddress,
        start_after: Option<GranterAddress>,
        limit: Option<u32>,
    },

    /// Returns (paged) grants made by the provided granter.
    #[cfg_attr(feature = "schema", returns(AllowancesByGranterPagedResponse))]
    AllowancesByGranterPaged {
        granter: GranterAddress,
        start_after: Option<GranteeAddress>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct MigrateMsg {}
