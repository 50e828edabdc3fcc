// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! Persistence layer for fee grants.
//!
//! Two key spaces share the module's store:
//! - grant records under `0x00 ‖ len(grantee) ‖ grantee ‖ len(granter) ‖ granter`,
//!   keyed grantee-first so that "all grants made out to X" is a single prefix scan,
//! - the expiry queue under `0x01 ‖ big-endian seconds ‖ len(grantee) ‖ grantee ‖
//!   len(granter) ‖ granter` with a single-byte presence marker as the value (the
//!   store rejects empty values); the fixed-width timestamp makes
//!   lexicographic key order chronological, which is what the pruner walks.
//!
//! Address segments always carry a single-byte length prefix. Without it the
//! grantee-first prefix scan would be ambiguous for addresses of different lengths.

use cosmwasm_std::{from_json, to_json_binary, Addr, Order, Storage, Timestamp};
use feegrant_contract_common::{FeegrantContractError, Grant};

const GRANT_KEY_PREFIX: u8 = 0x00;
const EXPIRY_QUEUE_KEY_PREFIX: u8 = 0x01;

pub mod retrieval_limits {
    pub const ALLOWANCES_DEFAULT_LIMIT: u32 = 100;
    pub const ALLOWANCES_MAX_LIMIT: u32 = 200;
}

pub mod prune_limits {
    /// Maximum number of expired grants removed in a single end-of-block sweep.
    pub const END_BLOCKER: usize = 200;

    /// Maximum number of expired grants removed by a single (permissionless)
    /// prune message.
    pub const MSG_PRUNE: usize = 75;
}

fn length_prefixed(address: &Addr) -> Result<Vec<u8>, FeegrantContractError> {
    let bytes = address.as_bytes();
    let Ok(len) = u8::try_from(bytes.len()) else {
        return Err(FeegrantContractError::InvalidAddress {
            reason: format!("address {address} is longer than 255 bytes"),
        });
    };
    let mut out = Vec::with_capacity(bytes.len() + 1);
    out.push(len);
    out.extend_from_slice(bytes);
    Ok(out)
}

fn read_length_prefixed_addr(data: &[u8]) -> Result<(Addr, &[u8]), FeegrantContractError> {
    let (&len, rest) = data
        .split_first()
        .ok_or(FeegrantContractError::MalformedExpiryQueueKey)?;
    if rest.len() < len as usize {
        return Err(FeegrantContractError::MalformedExpiryQueueKey);
    }
    let (address, rest) = rest.split_at(len as usize);
    let address = String::from_utf8(address.to_vec())
        .map_err(|_| FeegrantContractError::MalformedExpiryQueueKey)?;
    Ok((Addr::unchecked(address), rest))
}

pub(crate) fn grant_key(
    grantee: &Addr,
    granter: &Addr,
) -> Result<Vec<u8>, FeegrantContractError> {
    let mut key = vec![GRANT_KEY_PREFIX];
    key.extend(length_prefixed(grantee)?);
    key.extend(length_prefixed(granter)?);
    Ok(key)
}

fn grantee_prefix(grantee: &Addr) -> Result<Vec<u8>, FeegrantContractError> {
    let mut key = vec![GRANT_KEY_PREFIX];
    key.extend(length_prefixed(grantee)?);
    Ok(key)
}

pub(crate) fn expiry_queue_key(
    expiry_unix_timestamp: u64,
    grantee: &Addr,
    granter: &Addr,
) -> Result<Vec<u8>, FeegrantContractError> {
    let mut key = vec![EXPIRY_QUEUE_KEY_PREFIX];
    key.extend_from_slice(&expiry_unix_timestamp.to_be_bytes());
    key.extend(length_prefixed(grantee)?);
    key.extend(length_prefixed(granter)?);
    Ok(key)
}

/// Smallest key lexicographically above every key starting with `prefix`.
/// Only ever called with prefixes that contain a byte below 0xff.
fn prefix_range_end(prefix: &[u8]) -> Vec<u8> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            break;
        }
    }
    end
}

pub fn save_grant(storage: &mut dyn Storage, grant: &Grant) -> Result<(), FeegrantContractError> {
    let key = grant_key(&grant.grantee, &grant.granter)?;
    storage.set(&key, to_json_binary(grant)?.as_slice());
    Ok(())
}

pub fn may_load_grant(
    storage: &dyn Storage,
    granter: &Addr,
    grantee: &Addr,
) -> Result<Option<Grant>, FeegrantContractError> {
    let key = grant_key(grantee, granter)?;
    storage
        .get(&key)
        .map(|raw| from_json(&raw))
        .transpose()
        .map_err(Into::into)
}

pub fn has_grant(
    storage: &dyn Storage,
    granter: &Addr,
    grantee: &Addr,
) -> Result<bool, FeegrantContractError> {
    Ok(storage.get(&grant_key(grantee, granter)?).is_some())
}

/// Removes the grant record together with its expiry queue entry, if it has one.
pub fn remove_grant(
    storage: &mut dyn Storage,
    grant: &Grant,
) -> Result<(), FeegrantContractError> {
    storage.remove(&grant_key(&grant.grantee, &grant.granter)?);
    if let Some(expiry) = grant.allowance.expires_at() {
        storage.remove(&expiry_queue_key(expiry, &grant.grantee, &grant.granter)?);
    }
    Ok(())
}

pub(crate) fn remove_grant_record(
    storage: &mut dyn Storage,
    grantee: &Addr,
    granter: &Addr,
) -> Result<(), FeegrantContractError> {
    storage.remove(&grant_key(grantee, granter)?);
    Ok(())
}

pub fn insert_expiry_queue_entry(
    storage: &mut dyn Storage,
    expiry_unix_timestamp: u64,
    grantee: &Addr,
    granter: &Addr,
) -> Result<(), FeegrantContractError> {
    let key = expiry_queue_key(expiry_unix_timestamp, grantee, granter)?;
    // All information lives in the key; the value is a never-read presence marker.
    // cosmwasm-std forbids storing empty values, so we write a single sentinel byte.
    storage.set(&key, &[1]);
    Ok(())
}

pub(crate) fn remove_expiry_queue_entry(
    storage: &mut dyn Storage,
    expiry_unix_timestamp: u64,
    grantee: &Addr,
    granter: &Addr,
) -> Result<(), FeegrantContractError> {
    storage.remove(&expiry_queue_key(expiry_unix_timestamp, grantee, granter)?);
    Ok(())
}

/// Walks every stored grant in ascending key order.
pub fn all_grants(
    storage: &dyn Storage,
) -> impl Iterator<Item = Result<Grant, FeegrantContractError>> + '_ {
    storage
        .range(
            Some([GRANT_KEY_PREFIX].as_slice()),
            Some([GRANT_KEY_PREFIX + 1].as_slice()),
            Order::Ascending,
        )
        .map(|(_, value)| from_json(&value).map_err(Into::into))
}

/// Walks grants made out to `grantee` in ascending key order.
pub fn grants_by_grantee<'a>(
    storage: &'a dyn Storage,
    grantee: &Addr,
) -> Result<impl Iterator<Item = Result<Grant, FeegrantContractError>> + 'a, FeegrantContractError>
{
    let prefix = grantee_prefix(grantee)?;
    let end = prefix_range_end(&prefix);
    Ok(storage
        .range(Some(prefix.as_slice()), Some(end.as_slice()), Order::Ascending)
        .map(|(_, value)| from_json(&value).map_err(Into::into)))
}

pub(crate) fn grants_by_grantee_paged(
    storage: &dyn Storage,
    grantee: &Addr,
    start_after: Option<&Addr>,
    limit: usize,
) -> Result<Vec<Grant>, FeegrantContractError> {
    let prefix = grantee_prefix(grantee)?;
    let start = match start_after {
        Some(granter) => {
            // the smallest key strictly after the cursor's full key
            let mut key = grant_key(grantee, granter)?;
            key.push(0);
            key
        }
        None => prefix.clone(),
    };
    let end = prefix_range_end(&prefix);

    storage
        .range(Some(start.as_slice()), Some(end.as_slice()), Order::Ascending)
        .take(limit)
        .map(|(_, value)| from_json(&value).map_err(Into::into))
        .collect()
}

/// There is no granter-first index; this is a filtered walk over the primary one.
pub(crate) fn grants_by_granter_paged(
    storage: &dyn Storage,
    granter: &Addr,
    start_after: Option<&Addr>,
    limit: usize,
) -> Result<Vec<Grant>, FeegrantContractError> {
    let start = match start_after {
        Some(grantee) => prefix_range_end(&grantee_prefix(grantee)?),
        None => vec![GRANT_KEY_PREFIX],
    };

    let mut allowances = Vec::new();
    for (_, value) in storage.range(
        Some(start.as_slice()),
        Some([GRANT_KEY_PREFIX + 1].as_slice()),
        Order::Ascending,
    ) {
        let grant: Grant = from_json(&value)?;
        if &grant.granter == granter {
            allowances.push(grant);
            if allowances.len() >= limit {
                break;
            }
        }
    }
    Ok(allowances)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExpiryQueueEntry {
    pub expiry_unix_timestamp: u64,
    pub grantee: Addr,
    pub granter: Addr,
}

fn parse_expiry_queue_key(key: &[u8]) -> Result<ExpiryQueueEntry, FeegrantContractError> {
    let data = key
        .strip_prefix([EXPIRY_QUEUE_KEY_PREFIX].as_slice())
        .ok_or(FeegrantContractError::MalformedExpiryQueueKey)?;
    if data.len() < 8 {
        return Err(FeegrantContractError::MalformedExpiryQueueKey);
    }
    let (raw_time, rest) = data.split_at(8);
    let expiry_unix_timestamp = u64::from_be_bytes(
        raw_time
            .try_into()
            .map_err(|_| FeegrantContractError::MalformedExpiryQueueKey)?,
    );
    let (grantee, rest) = read_length_prefixed_addr(rest)?;
    let (granter, rest) = read_length_prefixed_addr(rest)?;
    if !rest.is_empty() {
        return Err(FeegrantContractError::MalformedExpiryQueueKey);
    }

    Ok(ExpiryQueueEntry {
        expiry_unix_timestamp,
        grantee,
        granter,
    })
}

/// Returns up to `limit` queue entries whose expiry is not after `block_time`,
/// in chronological order. No entry beyond the first unexpired one is ever visited.
pub(crate) fn expired_queue_entries(
    storage: &dyn Storage,
    block_time: Timestamp,
    limit: usize,
) -> Result<Vec<ExpiryQueueEntry>, FeegrantContractError> {
    let mut expired = Vec::new();
    for (key, _) in storage.range(
        Some([EXPIRY_QUEUE_KEY_PREFIX].as_slice()),
        Some([EXPIRY_QUEUE_KEY_PREFIX + 1].as_slice()),
        Order::Ascending,
    ) {
        let entry = parse_expiry_queue_key(&key)?;
        if entry.expiry_unix_timestamp > block_time.seconds() {
            break;
        }
        expired.push(entry);
        if expired.len() >= limit {
            break;
        }
    }
    Ok(expired)
}
