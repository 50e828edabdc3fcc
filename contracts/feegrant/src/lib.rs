// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

pub mod ante;
pub mod contract;
pub mod genesis;
pub mod storage;

mod queries;
mod transactions;

#[cfg(test)]
pub mod testing;

pub use transactions::{remove_expired_allowances, use_granted_fees};
