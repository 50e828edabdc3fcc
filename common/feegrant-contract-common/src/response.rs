// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::grant::Grant;
use crate::types::{GranteeAddress, GranterAddress};
use cosmwasm_schema::cw_serde;

#[cw_serde]
pub struct AllowanceResponse {
    pub grant: Grant,
}

#[cw_serde]
pub struct AllowancesPagedResponse {
    pub allowances: Vec<Grant>,

    /// Field indicating paging information for the following queries if the caller
    /// wishes to get further entries.
    pub start_next_after: Option<GranterAddress>,
}

#[cw_serde]
pub struct AllowancesByGranterPagedResponse {
    pub allowances: Vec<Grant>,

    /// Field indicating paging information for the following queries if the caller
    /// wishes to get further entries.
    pub start_next_after: Option<GranteeAddress>,
}
