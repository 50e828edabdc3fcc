// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::storage;
use crate::storage::prune_limits;
use cosmwasm_std::{Addr, Coin, DepsMut, Env, Event, MessageInfo, Response, Storage, Timestamp};
use feegrant_contract_common::events::{
    new_revoke_feegrant_event, new_set_feegrant_event, new_use_feegrant_event,
};
use feegrant_contract_common::{Allowance, FeegrantContractError, GasMeter, Grant};

/// Performs the expiry bookkeeping shared by the message and genesis paths and
/// writes the record. An allowance that is already expired is refused outright:
/// it would only ever be dead weight for the pruner.
pub(crate) fn save_new_grant(
    storage: &mut dyn Storage,
    env: &Env,
    grant: &Grant,
) -> Result<(), FeegrantContractError> {
    if let Some(expired_at) = grant.allowance.expires_at() {
        if Timestamp::from_seconds(expired_at) < env.block.time {
            return Err(FeegrantContractError::FeeLimitExpired {
                expired_at,
                block_time: env.block.time.seconds(),
            });
        }
        storage::insert_expiry_queue_entry(storage, expired_at, &grant.grantee, &grant.granter)?;
    }
    storage::save_grant(storage, grant)
}

pub fn try_grant_allowance(
    deps: DepsMut<'_>,
    env: Env,
    info: MessageInfo,
    grantee: String,
    allowance: Allowance,
) -> Result<Response, FeegrantContractError> {
    let grantee = deps.api.addr_validate(&grantee)?;
    let granter = info.sender;

    if granter == grantee {
        return Err(FeegrantContractError::SelfGrant { address: granter });
    }
    if storage::has_grant(deps.storage, &granter, &grantee)? {
        return Err(FeegrantContractError::AllowanceAlreadyExists { granter, grantee });
    }

    let grant = Grant::new(granter, grantee, allowance, env.block.time)?;
    save_new_grant(deps.storage, &env, &grant)?;

    Ok(Response::new().add_event(new_set_feegrant_event(&grant.granter, &grant.grantee)))
}

pub fn try_revoke_allowance(
    deps: DepsMut<'_>,
    info: MessageInfo,
    grantee: String,
) -> Result<Response, FeegrantContractError> {
    let grantee = deps.api.addr_validate(&grantee)?;
    let granter = info.sender;

    let grant = storage::may_load_grant(deps.storage, &granter, &grantee)?.ok_or_else(|| {
        FeegrantContractError::NoAllowance {
            granter: granter.clone(),
            grantee: grantee.clone(),
        }
    })?;
    storage::remove_grant(deps.storage, &grant)?;

    Ok(Response::new().add_event(new_revoke_feegrant_event(&granter, &grantee)))
}

pub fn try_prune_allowances(
    deps: DepsMut<'_>,
    env: Env,
) -> Result<Response, FeegrantContractError> {
    let events = remove_expired_allowances(deps.storage, &env, prune_limits::MSG_PRUNE)?;
    Ok(Response::new().add_events(events))
}

/// Charges `fee`, carried by a transaction made up of `msg_type_urls`, against the
/// allowance `granter` gave to `grantee`. Depending on the allowance's decision the
/// stored grant is updated, removed (exhausted or expired), or left untouched
/// (refusal). Returns the `use_feegrant` event on success.
pub fn use_granted_fees(
    storage: &mut dyn Storage,
    env: &Env,
    gas: &mut dyn GasMeter,
    granter: &Addr,
    grantee: &Addr,
    fee: &[Coin],
    msg_type_urls: &[String],
) -> Result<Event, FeegrantContractError> {
    let mut grant = storage::may_load_grant(storage, granter, grantee)?.ok_or_else(|| {
        FeegrantContractError::NoAllowance {
            granter: granter.clone(),
            grantee: grantee.clone(),
        }
    })?;

    let expires_at = grant.allowance.expires_at();
    match grant.allowance.accept(env, gas, fee, msg_type_urls) {
        Ok(exhausted) => {
            // usage never moves the expiry, so the queue entry needs no update
            debug_assert_eq!(grant.allowance.expires_at(), expires_at);
            if exhausted {
                storage::remove_grant(storage, &grant)?;
            } else {
                storage::save_grant(storage, &grant)?;
            }
            Ok(new_use_feegrant_event(granter, grantee))
        }
        Err(err) => {
            if matches!(err, FeegrantContractError::FeeLimitExpired { .. }) {
                storage::remove_grant(storage, &grant)?;
            }
            Err(err)
        }
    }
}

/// Deletes up to `limit` grants whose expiry is at or before the current block time,
/// walking the expiry queue chronologically so that no live grant is ever visited.
/// Each removal is announced with a `revoke_feegrant` event so that indexers observe
/// the transition.
pub fn remove_expired_allowances(
    storage: &mut dyn Storage,
    env: &Env,
    limit: usize,
) -> Result<Vec<Event>, FeegrantContractError> {
    let expired = storage::expired_queue_entries(&*storage, env.block.time, limit)?;

    let mut events = Vec::with_capacity(expired.len());
    for entry in expired {
        storage::remove_expiry_queue_entry(
            storage,
            entry.expiry_unix_timestamp,
            &entry.grantee,
            &entry.granter,
        )?;
        storage::remove_grant_record(storage, &entry.grantee, &entry.granter)?;
        events.push(new_revoke_feegrant_event(&entry.granter, &entry.grantee));
    }
    Ok(events)
}
