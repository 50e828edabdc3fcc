// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::storage::prune_limits;
use crate::{genesis, queries, transactions};
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response,
};
use feegrant_contract_common::{
    ExecuteMsg, FeegrantContractError, InstantiateMsg, MigrateMsg, QueryMsg,
};

const CONTRACT_NAME: &str = "crate:nym-feegrant-contract";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut<'_>,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, FeegrantContractError> {
    cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    genesis::init_genesis(deps, &env, msg.allowances)?;

    Ok(Response::default())
}

#[entry_point]
pub fn execute(
    deps: DepsMut<'_>,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, FeegrantContractError> {
    match msg {
        ExecuteMsg::GrantAllowance { grantee, allowance } => {
            transactions::try_grant_allowance(deps, env, info, grantee, *allowance)
        }
        ExecuteMsg::RevokeAllowance { grantee } => {
            transactions::try_revoke_allowance(deps, info, grantee)
        }
        ExecuteMsg::PruneAllowances {} => transactions::try_prune_allowances(deps, env),
    }
}

#[entry_point]
pub fn query(deps: Deps<'_>, _env: Env, msg: QueryMsg) -> Result<Binary, FeegrantContractError> {
    match msg {
        QueryMsg::Allowance { granter, grantee } => Ok(to_json_binary(
            &queries::query_allowance(deps, granter, grantee)?,
        )?),
        QueryMsg::AllowancesPaged {
            grantee,
            start_after,
            limit,
        } => Ok(to_json_binary(&queries::query_allowances_paged(
            deps,
            grantee,
            start_after,
            limit,
        )?)?),
        QueryMsg::AllowancesByGranterPaged {
            granter,
            start_after,
            limit,
        } => Ok(to_json_binary(&queries::query_allowances_by_granter_paged(
            deps,
            granter,
            start_after,
            limit,
        )?)?),
    }
}

#[entry_point]
pub fn migrate(
    deps: DepsMut<'_>,
    _env: Env,
    _msg: MigrateMsg,
) -> Result<Response, FeegrantContractError> {
    cw2::ensure_from_older_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Default::default())
}

/// Hook for the chain runtime, invoked once per block after all transactions have
/// settled: sweeps a bounded batch of expired grants out of the store.
pub fn end_block(deps: DepsMut<'_>, env: Env) -> Result<Response, FeegrantContractError> {
    let events =
        transactions::remove_expired_allowances(deps.storage, &env, prune_limits::END_BLOCKER)?;
    Ok(Response::new().add_events(events))
}
