// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::coins;
use cosmwasm_std::{Addr, Coin, Event};

// event types
pub const SET_FEEGRANT_EVENT_TYPE: &str = "set_feegrant";
pub const REVOKE_FEEGRANT_EVENT_TYPE: &str = "revoke_feegrant";
pub const USE_FEEGRANT_EVENT_TYPE: &str = "use_feegrant";
pub const TX_EVENT_TYPE: &str = "tx";

// attributes
pub const GRANTER_KEY: &str = "granter";
pub const GRANTEE_KEY: &str = "grantee";
pub const FEE_KEY: &str = "fee";
pub const FEE_PAYER_KEY: &str = "fee_payer";

pub fn new_set_feegrant_event(granter: &Addr, grantee: &Addr) -> Event {
    Event::new(SET_FEEGRANT_EVENT_TYPE)
        .add_attribute(GRANTER_KEY, granter.as_str())
        .add_attribute(GRANTEE_KEY, grantee.as_str())
}

pub fn new_revoke_feegrant_event(granter: &Addr, grantee: &Addr) -> Event {
    Event::new(REVOKE_FEEGRANT_EVENT_TYPE)
        .add_attribute(GRANTER_KEY, granter.as_str())
        .add_attribute(GRANTEE_KEY, grantee.as_str())
}

pub fn new_use_feegrant_event(granter: &Addr, grantee: &Addr) -> Event {
    Event::new(USE_FEEGRANT_EVENT_TYPE)
        .add_attribute(GRANTER_KEY, granter.as_str())
        .add_attribute(GRANTEE_KEY, grantee.as_str())
}

pub fn new_tx_fee_event(fee: &[Coin], fee_payer: &Addr) -> Event {
    Event::new(TX_EVENT_TYPE)
        .add_attribute(FEE_KEY, coins::format_coins(fee))
        .add_attribute(FEE_PAYER_KEY, fee_payer.as_str())
}

/// Looks up the value of a particular attribute in the provided event.
/// Returns None if it does not exist.
pub fn may_find_attribute(event: &Event, key: &str) -> Option<String> {
    for attr in &event.attributes {
        if attr.key == key {
            return Some(attr.value.clone());
        }
    }
    None
}
