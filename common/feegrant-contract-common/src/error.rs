// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use cosmwasm_std::{Addr, StdError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FeegrantContractError {
    #[error("{source}")]
    StdErr {
        #[from]
        source: StdError,
    },

    #[error("fee limit exceeded: {scope}")]
    FeeLimitExceeded { scope: &'static str },

    #[error("fee allowance expired at {expired_at} (current block time: {block_time})")]
    FeeLimitExpired { expired_at: u64, block_time: u64 },

    #[error("invalid duration: {reason}")]
    InvalidDuration { reason: String },

    #[error("no fee allowance exists between granter {granter} and grantee {grantee}")]
    NoAllowance { granter: Addr, grantee: Addr },

    #[error("allowed messages shouldn't be empty")]
    NoMessages,

    #[error("message {msg_type_url} does not exist in allowed messages")]
    MessageNotAllowed { msg_type_url: String },

    #[error("invalid coins: {reason}")]
    InvalidCoins { reason: String },

    #[error("{address} cannot grant a fee allowance to itself")]
    SelfGrant { address: Addr },

    #[error("fee allowance from {granter} to {grantee} already exists")]
    AllowanceAlreadyExists { granter: Addr, grantee: Addr },

    #[error("invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("account {address} does not exist")]
    UnknownAddress { address: Addr },

    #[error("account {address} has insufficient funds to pay {required}")]
    InsufficientFunds { address: Addr, required: String },

    #[error("invalid gas limit: must provide positive gas")]
    InvalidGasLimit,

    #[error("failed to decode transaction: {reason}")]
    TxDecode { reason: String },

    #[error("{granter} is not allowed to pay fees for {payer}: {source}")]
    FeeGranterNotAllowed {
        granter: Addr,
        payer: Addr,
        source: Box<FeegrantContractError>,
    },

    #[error("the fee collector module account has not been set")]
    FeeCollectorNotSet,

    #[error("fee grants are not supported on this chain")]
    FeeGrantsNotSupported,

    #[error("out of gas whilst {descriptor}")]
    OutOfGas { descriptor: &'static str },

    #[error("stored expiry queue entry has a malformed key")]
    MalformedExpiryQueueKey,
}
