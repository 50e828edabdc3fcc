// Copyright 2025 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::ante::{AccountCapability, BankCapability, FEE_COLLECTOR_NAME};
use crate::contract;
use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{coin, Addr, Coin, Env, MemoryStorage, OwnedDeps, Timestamp};
use feegrant_contract_common::{
    coins, Allowance, BasicAllowance, FeegrantContractError, InstantiateMsg,
};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::{BTreeMap, BTreeSet};

pub fn test_rng() -> ChaCha20Rng {
    let dummy_seed = [42u8; 32];
    ChaCha20Rng::from_seed(dummy_seed)
}

/// Generates `n` unique addresses, sorted so that they come back from storage
/// scans in exactly this order.
pub fn generate_sorted_addresses(api: &MockApi, n: usize) -> Vec<Addr> {
    let mut rng = test_rng();
    let mut addresses = Vec::with_capacity(n);
    for i in 0..n {
        addresses.push(api.addr_make(&format!("addr{i}{}", rng.next_u64())));
    }
    addresses.sort();
    addresses
}

pub fn env_at(seconds: u64) -> Env {
    let mut env = mock_env();
    env.block.time = Timestamp::from_seconds(seconds);
    env
}

pub fn basic_allowance(amount: u128) -> Allowance {
    Allowance::Basic(BasicAllowance::new(Some(vec![coin(amount, "atom")]), None))
}

#[allow(clippy::unwrap_used)]
pub fn init_contract() -> OwnedDeps<MemoryStorage, MockApi, MockQuerier> {
    let mut deps = mock_dependencies();
    let sender = deps.api.addr_make("instantiator");
    contract::instantiate(
        deps.as_mut(),
        mock_env(),
        message_info(&sender, &[]),
        InstantiateMsg { allowances: vec![] },
    )
    .unwrap();
    deps
}

fn deposit(target: &mut Vec<Coin>, amount: &[Coin]) {
    for coin in amount {
        match target.iter_mut().find(|held| held.denom == coin.denom) {
            Some(held) => held.amount += coin.amount,
            None => target.push(coin.clone()),
        }
    }
}

/// In-memory stand-in for the bank subsystem.
#[derive(Debug, Default)]
pub struct MockBank {
    balances: BTreeMap<Addr, Vec<Coin>>,
    module_balances: BTreeMap<String, Vec<Coin>>,
}

impl MockBank {
    pub fn with_balance(mut self, address: &Addr, balance: Vec<Coin>) -> Self {
        self.balances.insert(address.clone(), balance);
        self
    }

    pub fn balance(&self, address: &Addr) -> Vec<Coin> {
        self.balances.get(address).cloned().unwrap_or_default()
    }

    pub fn module_balance(&self, module: &str) -> Vec<Coin> {
        self.module_balances.get(module).cloned().unwrap_or_default()
    }

    fn withdraw(&mut self, from: &Addr, amount: &[Coin]) -> Result<(), FeegrantContractError> {
        let balance = self.balance(from);
        let Some(left) = coins::checked_sub(&balance, amount) else {
            return Err(FeegrantContractError::InsufficientFunds {
                address: from.clone(),
                required: coins::format_coins(amount),
            });
        };
        self.balances.insert(from.clone(), left);
        Ok(())
    }
}

impl BankCapability for MockBank {
    fn send_coins_from_account_to_module(
        &mut self,
        from: &Addr,
        module: &str,
        amount: &[Coin],
    ) -> Result<(), FeegrantContractError> {
        self.withdraw(from, amount)?;
        deposit(
            self.module_balances.entry(module.to_string()).or_default(),
            amount,
        );
        Ok(())
    }

    fn send_coins(
        &mut self,
        from: &Addr,
        to: &Addr,
        amount: &[Coin],
    ) -> Result<(), FeegrantContractError> {
        self.withdraw(from, amount)?;
        deposit(self.balances.entry(to.clone()).or_default(), amount);
        Ok(())
    }
}

/// In-memory stand-in for the account subsystem.
#[derive(Debug, Default)]
pub struct MockAccounts {
    accounts: BTreeSet<Addr>,
    modules: BTreeMap<String, Addr>,
}

impl MockAccounts {
    /// Account set with the fee collector module already registered.
    pub fn new(api: &MockApi) -> Self {
        let mut modules = BTreeMap::new();
        modules.insert(
            FEE_COLLECTOR_NAME.to_string(),
            api.addr_make(FEE_COLLECTOR_NAME),
        );
        MockAccounts {
            accounts: BTreeSet::new(),
            modules,
        }
    }

    pub fn without_fee_collector() -> Self {
        Default::default()
    }

    pub fn with_account(mut self, address: &Addr) -> Self {
        self.accounts.insert(address.clone());
        self
    }
}

impl AccountCapability for MockAccounts {
    fn account_exists(&self, address: &Addr) -> bool {
        self.accounts.contains(address)
    }

    fn module_address(&self, module: &str) -> Option<Addr> {
        self.modules.get(module).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_bank_moves_coins_between_accounts() -> anyhow::Result<()> {
        let deps = mock_dependencies();
        let from = deps.api.addr_make("from");
        let to = deps.api.addr_make("to");
        let mut bank = MockBank::default().with_balance(&from, vec![coin(100, "unym")]);

        bank.send_coins(&from, &to, &[coin(40, "unym")])?;
        assert_eq!(bank.balance(&from), vec![coin(60, "unym")]);
        assert_eq!(bank.balance(&to), vec![coin(40, "unym")]);

        let res = bank.send_coins(&from, &to, &[coin(100, "unym")]);
        assert!(matches!(
            res,
            Err(FeegrantContractError::InsufficientFunds { .. })
        ));
        Ok(())
    }
}
