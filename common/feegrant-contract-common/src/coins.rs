// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! Helpers for working with multi-asset coin lists. Every spend limit and fee in this
//! module is a `Vec<Coin>` with unique denominations; these functions provide the handful
//! of set-like operations the allowance logic needs on top of the raw cosmwasm type.

use crate::error::FeegrantContractError;
use cosmwasm_std::Coin;
use std::collections::BTreeSet;

/// Checks the structural validity of a coin list: no empty denominations and
/// no duplicated denominations. Amounts are unconstrained here.
pub fn validate(coins: &[Coin]) -> Result<(), FeegrantContractError> {
    let mut seen = BTreeSet::new();
    for coin in coins {
        if coin.denom.is_empty() {
            return Err(FeegrantContractError::InvalidCoins {
                reason: "empty denomination".to_string(),
            });
        }
        if !seen.insert(coin.denom.as_str()) {
            return Err(FeegrantContractError::InvalidCoins {
                reason: format!("duplicate denomination {}", coin.denom),
            });
        }
    }
    Ok(())
}

/// True if the list is non-empty and every amount is strictly positive.
pub fn all_positive(coins: &[Coin]) -> bool {
    !coins.is_empty() && coins.iter().all(|coin| !coin.amount.is_zero())
}

/// True if every amount is zero. An empty list counts as zero.
pub fn is_zero(coins: &[Coin]) -> bool {
    coins.iter().all(|coin| coin.amount.is_zero())
}

/// Subtracts `subtrahend` from `minuend` per denomination.
/// Returns `None` if any denomination would go below zero, including denominations
/// of `subtrahend` that `minuend` does not contain at all. Denominations that reach
/// exactly zero are dropped from the result.
pub fn checked_sub(minuend: &[Coin], subtrahend: &[Coin]) -> Option<Vec<Coin>> {
    for sub in subtrahend {
        if !sub.amount.is_zero() && !minuend.iter().any(|coin| coin.denom == sub.denom) {
            return None;
        }
    }

    let mut result = Vec::with_capacity(minuend.len());
    for coin in minuend {
        let mut left = coin.amount;
        for sub in subtrahend {
            if sub.denom == coin.denom {
                left = left.checked_sub(sub.amount).ok()?;
            }
        }
        if !left.is_zero() {
            result.push(Coin {
                denom: coin.denom.clone(),
                amount: left,
            });
        }
    }
    Some(result)
}

/// True if every denomination of `coins` also appears in `superset`.
pub fn denoms_subset_of(coins: &[Coin], superset: &[Coin]) -> bool {
    coins
        .iter()
        .all(|coin| superset.iter().any(|sup| sup.denom == coin.denom))
}

/// Renders a coin list the way the chain does in event attributes, e.g. `512atom,10unym`.
pub fn format_coins(coins: &[Coin]) -> String {
    coins
        .iter()
        .map(|coin| coin.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
