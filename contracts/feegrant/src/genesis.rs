// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::storage;
use crate::transactions;
use cosmwasm_std::{DepsMut, Env, Storage};
use feegrant_contract_common::{FeegrantContractError, Grant};

/// Loads a full set of grants, typically exported from a previous incarnation of the
/// chain. Every record goes through the same validation as a freshly granted one;
/// a well-formed export contains no duplicates, so any duplicate is refused rather
/// than silently merged. Recorded creation times are preserved.
pub fn init_genesis(
    deps: DepsMut<'_>,
    env: &Env,
    allowances: Vec<Grant>,
) -> Result<(), FeegrantContractError> {
    for grant in allowances {
        let granter = deps.api.addr_validate(grant.granter.as_str())?;
        let grantee = deps.api.addr_validate(grant.grantee.as_str())?;

        if storage::has_grant(deps.storage, &granter, &grantee)? {
            return Err(FeegrantContractError::AllowanceAlreadyExists { granter, grantee });
        }

        let grant = Grant::new(granter, grantee, grant.allowance, grant.granted_at)?;
        transactions::save_new_grant(deps.storage, env, &grant)?;
    }
    Ok(())
}

/// Dumps every stored grant in deterministic (ascending key) order, without
/// transformations, so that feeding the result back through [`init_genesis`]
/// reproduces the exact same state.
pub fn export_genesis(storage: &dyn Storage) -> Result<Vec<Grant>, FeegrantContractError> {
    storage::all_grants(storage).collect()
}
