// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

/// Unvalidated address of an account granting a fee allowance,
/// as provided in messages and queries.
pub type GranterAddress = String;

/// Unvalidated address of an account receiving a fee allowance,
/// as provided in messages and queries.
pub type GranteeAddress = String;
