// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! The deduct-fee stage of transaction admission.
//!
//! Before a transaction executes, the chain resolves who actually supplies the fee:
//! the transaction's fee payer, or, when a distinct fee granter is nominated, that
//! granter's allowance towards the payer. The decorator here drives that resolution,
//! charges the allowance and asks the bank to move the fee into the fee collector
//! module account. A failing transaction never reaches execution and never touches
//! the granter's funds.

use crate::transactions;
use cosmwasm_std::{Addr, Coin, DepsMut, Env, Response};
use feegrant_contract_common::coins;
use feegrant_contract_common::events::new_tx_fee_event;
use feegrant_contract_common::{FeegrantContractError, GasMeter};

/// Name of the module account collecting all transaction fees.
pub const FEE_COLLECTOR_NAME: &str = "fee_collector";

/// Fee information carried by a fee-bearing transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fee {
    pub amount: Vec<Coin>,
    pub gas_limit: u64,

    /// The account designated to cover the fee; defaults to the first signer upstream.
    pub payer: Addr,

    /// Optional account nominated to supply the fee instead of the payer. When set and
    /// distinct from the payer, the fee-grant lookup is triggered.
    pub granter: Option<Addr>,
}

/// The slice of a decoded transaction the fee deduction stage operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tx {
    /// `None` for transactions that are not fee-bearing.
    pub fee: Option<Fee>,
    pub msg_type_urls: Vec<String>,
}

/// Capability handle onto the bank subsystem.
pub trait BankCapability {
    fn send_coins_from_account_to_module(
        &mut self,
        from: &Addr,
        module: &str,
        amount: &[Coin],
    ) -> Result<(), FeegrantContractError>;

    fn send_coins(
        &mut self,
        from: &Addr,
        to: &Addr,
        amount: &[Coin],
    ) -> Result<(), FeegrantContractError>;
}

/// Capability handle onto the account subsystem.
pub trait AccountCapability {
    fn account_exists(&self, address: &Addr) -> bool;

    fn module_address(&self, module: &str) -> Option<Addr>;
}

/// Externally supplied policy computing the effective fee of a transaction,
/// typically from the mempool's minimum gas prices. Never consulted in simulation.
pub type TxFeeChecker = fn(&Env, &Fee) -> Result<Vec<Coin>, FeegrantContractError>;

pub struct DeductFeeDecorator<'a, B, A> {
    bank: &'a mut B,
    accounts: &'a A,
    fee_checker: Option<TxFeeChecker>,
}

impl<'a, B, A> DeductFeeDecorator<'a, B, A>
where
    B: BankCapability,
    A: AccountCapability,
{
    pub fn new(bank: &'a mut B, accounts: &'a A, fee_checker: Option<TxFeeChecker>) -> Self {
        DeductFeeDecorator {
            bank,
            accounts,
            fee_checker,
        }
    }

    pub fn ante_handle(
        &mut self,
        deps: DepsMut<'_>,
        env: &Env,
        gas: &mut dyn GasMeter,
        tx: &Tx,
        simulate: bool,
    ) -> Result<Response, FeegrantContractError> {
        let Some(fee) = &tx.fee else {
            return Err(FeegrantContractError::TxDecode {
                reason: "transaction carries no fee information".to_string(),
            });
        };

        if !simulate && env.block.height > 0 && fee.gas_limit == 0 {
            return Err(FeegrantContractError::InvalidGasLimit);
        }

        let fee_amount = match (simulate, self.fee_checker) {
            (false, Some(checker)) => checker(env, fee)?,
            _ => fee.amount.clone(),
        };

        self.check_deduct_fee(deps, env, gas, tx, fee, fee_amount)
    }

    fn check_deduct_fee(
        &mut self,
        deps: DepsMut<'_>,
        env: &Env,
        gas: &mut dyn GasMeter,
        tx: &Tx,
        fee: &Fee,
        fee_amount: Vec<Coin>,
    ) -> Result<Response, FeegrantContractError> {
        if self.accounts.module_address(FEE_COLLECTOR_NAME).is_none() {
            return Err(FeegrantContractError::FeeCollectorNotSet);
        }

        let mut response = Response::new();
        let deduct_from = match &fee.granter {
            Some(granter) if granter != &fee.payer => {
                let event = transactions::use_granted_fees(
                    deps.storage,
                    env,
                    gas,
                    granter,
                    &fee.payer,
                    &fee_amount,
                    &tx.msg_type_urls,
                )
                .map_err(|err| FeegrantContractError::FeeGranterNotAllowed {
                    granter: granter.clone(),
                    payer: fee.payer.clone(),
                    source: Box::new(err),
                })?;
                response = response.add_event(event);
                granter.clone()
            }
            _ => fee.payer.clone(),
        };

        if !self.accounts.account_exists(&deduct_from) {
            return Err(FeegrantContractError::UnknownAddress {
                address: deduct_from,
            });
        }

        if !coins::is_zero(&fee_amount) {
            self.bank
                .send_coins_from_account_to_module(&deduct_from, FEE_COLLECTOR_NAME, &fee_amount)?;
        }

        Ok(response.add_event(new_tx_fee_event(&fee_amount, &deduct_from)))
    }
}

/// Drop-in for chains that do not support fee grants at all: any transaction
/// nominating a fee granter is refused before the deduction stage ever runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RejectFeeGranterDecorator;

impl RejectFeeGranterDecorator {
    pub fn ante_handle(&self, tx: &Tx) -> Result<(), FeegrantContractError> {
        if tx.fee.as_ref().is_some_and(|fee| fee.granter.is_some()) {
            return Err(FeegrantContractError::FeeGrantsNotSupported);
        }
        Ok(())
    }
}
