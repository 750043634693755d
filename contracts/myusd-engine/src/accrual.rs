//! Debt share accounting.
//!
//! Debt is held as shares of one pool. The pool's exchange rate (MyUSD per
//! share, scaled 1e18) grows with simple interest between checkpoints, so every
//! borrower accrues at the same rate without per-account bookkeeping.

use soroban_sdk::{log, Address, Env, U256};

use crate::constants::{BASIS_POINTS, PRECISION, SECONDS_PER_YEAR};
use crate::errors::Error;
use crate::events::InterestAccrued;
use crate::helpers::mul_div;
use crate::storage::*;

/// Exchange rate as of the current ledger time, without writing a checkpoint.
pub fn current_exchange_rate(env: &Env) -> Result<u128, Error> {
    let stored_rate = debt_exchange_rate(env)?;
    let total_shares = total_debt_shares(env);
    if total_shares == 0 {
        return Ok(stored_rate);
    }
    let last = last_accrual_time(env)?;
    let now = env.ledger().timestamp();
    let rate_bps = borrow_rate(env);
    if now <= last || rate_bps == 0 {
        return Ok(stored_rate);
    }
    let elapsed = (now - last) as u128;

    let total_debt_value = mul_div(env, total_shares, stored_rate, PRECISION)?;
    let interest = interest_for(env, total_debt_value, rate_bps, elapsed)?;
    let interest_per_share = mul_div(env, interest, PRECISION, total_shares)?;
    stored_rate
        .checked_add(interest_per_share)
        .ok_or(Error::MathOverflow)
}

/// `value * rate_bps * elapsed / (SECONDS_PER_YEAR * BASIS_POINTS)`
fn interest_for(env: &Env, value: u128, rate_bps: u32, elapsed: u128) -> Result<u128, Error> {
    U256::from_u128(env, value)
        .mul(&U256::from_u128(env, rate_bps as u128))
        .mul(&U256::from_u128(env, elapsed))
        .div(&U256::from_u128(env, SECONDS_PER_YEAR * BASIS_POINTS))
        .to_u128()
        .ok_or(Error::MathOverflow)
}

/// Checkpoint: lock in interest up to now. An idle pool only moves the clock.
pub fn accrue(env: &Env) -> Result<u128, Error> {
    bump_debt_state_ttl(env);
    let now = env.ledger().timestamp();
    let stored_rate = debt_exchange_rate(env)?;
    let last = last_accrual_time(env)?;
    if total_debt_shares(env) == 0 {
        set_last_accrual_time(env, now);
        return Ok(stored_rate);
    }
    let new_rate = current_exchange_rate(env)?;
    if new_rate > stored_rate {
        set_debt_exchange_rate(env, new_rate);
        log!(env, "accrued", stored_rate, new_rate);
        InterestAccrued {
            exchange_rate: new_rate,
            interest_per_share: new_rate - stored_rate,
            elapsed: now.saturating_sub(last),
        }
        .publish(env);
    }
    if now > last {
        set_last_accrual_time(env, now);
    }
    Ok(new_rate)
}

/// Shares for `amount` MyUSD, rounded down.
pub fn amount_to_shares(env: &Env, amount: u128) -> Result<u128, Error> {
    let rate = current_exchange_rate(env)?;
    mul_div(env, amount, PRECISION, rate)
}

/// MyUSD value of `shares`, rounded down.
pub fn shares_to_amount(env: &Env, shares: u128) -> Result<u128, Error> {
    if shares == 0 {
        return Ok(0);
    }
    let rate = current_exchange_rate(env)?;
    mul_div(env, shares, rate, PRECISION)
}

pub fn current_debt_value(env: &Env, account: &Address) -> Result<u128, Error> {
    shares_to_amount(env, debt_shares_of(env, account))
}

/// Add `shares` to `account` and to the pool total.
pub fn issue_shares(env: &Env, account: &Address, shares: u128) -> Result<(), Error> {
    let account_shares = debt_shares_of(env, account)
        .checked_add(shares)
        .ok_or(Error::MathOverflow)?;
    let total = total_debt_shares(env)
        .checked_add(shares)
        .ok_or(Error::MathOverflow)?;
    set_debt_shares(env, account, account_shares);
    set_total_debt_shares(env, total);
    Ok(())
}

/// Remove `shares` from `account` and from the pool total.
pub fn retire_shares(env: &Env, account: &Address, shares: u128) -> Result<(), Error> {
    let account_shares = debt_shares_of(env, account)
        .checked_sub(shares)
        .ok_or(Error::InvalidAmount)?;
    let total = total_debt_shares(env)
        .checked_sub(shares)
        .ok_or(Error::MathOverflow)?;
    set_debt_shares(env, account, account_shares);
    set_total_debt_shares(env, total);
    Ok(())
}
