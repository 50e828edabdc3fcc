// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

#![warn(clippy::expect_used)]
#![warn(clippy::unwrap_used)]

pub mod allowances;
pub mod coins;
pub mod error;
pub mod events;
pub mod gas;
pub mod grant;
pub mod msg;
pub mod response;
pub mod types;

pub use allowances::{
    Allowance, AllowedMsgAllowance, BasicAllowance, PeriodicAllowance, GAS_COST_PER_ITERATION,
};
pub use error::FeegrantContractError;
pub use gas::{GasMeter, LimitedGasMeter, TrackingGasMeter};
pub use grant::Grant;
pub use msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
pub use response::{
    AllowanceResponse, AllowancesByGranterPagedResponse, AllowancesPagedResponse,
};
pub use types::{GranteeAddress, GranterAddress};
