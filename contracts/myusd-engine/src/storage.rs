use soroban_sdk::{contracttype, Address, Env};

use crate::constants::{TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::errors::Error;

#[soroban_sdk::contractclient(name = "PriceOracleClient")]
pub trait PriceOracle {
    /// Stablecoin per collateral unit, scaled 1e18.
    fn get_price(env: Env) -> u128;
}

#[soroban_sdk::contractclient(name = "StablecoinClient")]
pub trait Stablecoin {
    fn mint_to(env: Env, to: Address, amount: i128);
    fn burn_from(env: Env, spender: Address, from: Address, amount: i128);
    fn balance(env: Env, id: Address) -> i128;
    fn allowance(env: Env, owner: Address, spender: Address) -> i128;
}

#[soroban_sdk::contractclient(name = "SavingsModuleClient")]
pub trait SavingsModule {
    /// Savings rate in basis points.
    fn savings_rate(env: Env) -> u32;
}

// Storage key types for the engine
#[contracttype]
pub enum DataKey {
    Initialized,         // bool
    Admin,               // Address
    RateController,      // Address
    CollateralToken,     // Address (base asset token contract)
    Stablecoin,          // Address (MyUSD ledger)
    Oracle,              // Address
    SavingsModule,       // Address
    BorrowRate,          // u32, basis points per year
    TotalDebtShares,     // u128
    DebtExchangeRate,    // u128, scaled 1e18
    LastAccrualTime,     // u64
    Collateral(Address), // u128 collateral units per account
    DebtShares(Address), // u128 debt shares per account
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EngineConfig {
    pub admin: Address,
    pub rate_controller: Address,
    pub collateral_token: Address,
    pub stablecoin: Address,
    pub oracle: Address,
    pub savings_module: Address,
    pub borrow_rate: u32,
}

/// Snapshot of one account, valued at the projected exchange rate.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub collateral: u128,
    pub debt_shares: u128,
    pub debt_value: u128,
    pub collateral_value: u128,
    pub ratio: u128,
    pub liquidatable: bool,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage()
        .persistent()
        .get::<_, bool>(&DataKey::Initialized)
        .unwrap_or(false)
}

pub fn ensure_initialized(env: &Env) -> Result<(), Error> {
    if !is_initialized(env) {
        return Err(Error::NotInitialized);
    }
    bump_core_ttl(env);
    Ok(())
}

pub fn read_address(env: &Env, key: &DataKey) -> Result<Address, Error> {
    env.storage()
        .persistent()
        .get(key)
        .ok_or(Error::NotInitialized)
}

pub fn write_address(env: &Env, key: &DataKey, addr: &Address) {
    env.storage().persistent().set(key, addr);
}

pub fn read_config(env: &Env) -> Result<EngineConfig, Error> {
    Ok(EngineConfig {
        admin: read_address(env, &DataKey::Admin)?,
        rate_controller: read_address(env, &DataKey::RateController)?,
        collateral_token: read_address(env, &DataKey::CollateralToken)?,
        stablecoin: read_address(env, &DataKey::Stablecoin)?,
        oracle: read_address(env, &DataKey::Oracle)?,
        savings_module: read_address(env, &DataKey::SavingsModule)?,
        borrow_rate: borrow_rate(env),
    })
}

pub fn borrow_rate(env: &Env) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::BorrowRate)
        .unwrap_or(0u32)
}

pub fn write_borrow_rate(env: &Env, rate: u32) {
    env.storage().persistent().set(&DataKey::BorrowRate, &rate);
}

pub fn total_debt_shares(env: &Env) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::TotalDebtShares)
        .unwrap_or(0u128)
}

pub fn set_total_debt_shares(env: &Env, value: u128) {
    env.storage()
        .persistent()
        .set(&DataKey::TotalDebtShares, &value);
}

pub fn debt_exchange_rate(env: &Env) -> Result<u128, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::DebtExchangeRate)
        .ok_or(Error::NotInitialized)
}

pub fn set_debt_exchange_rate(env: &Env, rate: u128) {
    env.storage()
        .persistent()
        .set(&DataKey::DebtExchangeRate, &rate);
}

pub fn last_accrual_time(env: &Env) -> Result<u64, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::LastAccrualTime)
        .ok_or(Error::NotInitialized)
}

pub fn set_last_accrual_time(env: &Env, timestamp: u64) {
    env.storage()
        .persistent()
        .set(&DataKey::LastAccrualTime, &timestamp);
}

pub fn collateral_of(env: &Env, account: &Address) -> u128 {
    let key = DataKey::Collateral(account.clone());
    bump_key_ttl(env, &key);
    env.storage().persistent().get(&key).unwrap_or(0u128)
}

pub fn set_collateral(env: &Env, account: &Address, amount: u128) {
    let key = DataKey::Collateral(account.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &amount);
    bump_key_ttl(env, &key);
}

pub fn debt_shares_of(env: &Env, account: &Address) -> u128 {
    let key = DataKey::DebtShares(account.clone());
    bump_key_ttl(env, &key);
    env.storage().persistent().get(&key).unwrap_or(0u128)
}

pub fn set_debt_shares(env: &Env, account: &Address, shares: u128) {
    let key = DataKey::DebtShares(account.clone());
    if shares == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &shares);
    bump_key_ttl(env, &key);
}

fn bump_key_ttl(env: &Env, key: &DataKey) {
    let persistent = env.storage().persistent();
    if persistent.has(key) {
        persistent.extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

pub fn bump_core_ttl(env: &Env) {
    bump_key_ttl(env, &DataKey::Initialized);
    bump_key_ttl(env, &DataKey::Admin);
    bump_key_ttl(env, &DataKey::RateController);
    bump_key_ttl(env, &DataKey::CollateralToken);
    bump_key_ttl(env, &DataKey::Stablecoin);
    bump_key_ttl(env, &DataKey::Oracle);
    bump_key_ttl(env, &DataKey::SavingsModule);
}

pub fn bump_debt_state_ttl(env: &Env) {
    bump_key_ttl(env, &DataKey::BorrowRate);
    bump_key_ttl(env, &DataKey::TotalDebtShares);
    bump_key_ttl(env, &DataKey::DebtExchangeRate);
    bump_key_ttl(env, &DataKey::LastAccrualTime);
}
