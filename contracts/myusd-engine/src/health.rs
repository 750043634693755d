use soroban_sdk::{Address, Env};

use crate::accrual::current_debt_value;
use crate::constants::{COLLATERAL_RATIO_THRESHOLD, MAX_POSITION_RATIO, PERCENT, PRECISION};
use crate::errors::Error;
use crate::helpers::{mul_div, mul_div_saturating, oracle_price};
use crate::storage::{collateral_of, debt_shares_of, Position};

pub fn collateral_value_at(env: &Env, collateral: u128, price: u128) -> Result<u128, Error> {
    mul_div(env, collateral, price, PRECISION)
}

pub fn collateral_value(env: &Env, account: &Address) -> Result<u128, Error> {
    let collateral = collateral_of(env, account);
    if collateral == 0 {
        return Ok(0);
    }
    collateral_value_at(env, collateral, oracle_price(env)?)
}

/// Collateral value over debt value, scaled 1e18. Debt-free positions report
/// `MAX_POSITION_RATIO`.
pub fn position_ratio(env: &Env, account: &Address) -> Result<u128, Error> {
    let debt_value = current_debt_value(env, account)?;
    if debt_value == 0 {
        return Ok(MAX_POSITION_RATIO);
    }
    let value = collateral_value(env, account)?;
    Ok(mul_div_saturating(env, value, PRECISION, debt_value))
}

pub fn ratio_below_threshold(ratio: u128) -> bool {
    ratio.saturating_mul(PERCENT) < COLLATERAL_RATIO_THRESHOLD * PRECISION
}

pub fn is_liquidatable(env: &Env, account: &Address) -> Result<bool, Error> {
    Ok(ratio_below_threshold(position_ratio(env, account)?))
}

/// Gate for mint and withdraw. Runs after the tentative write; an `Err` here
/// rolls the whole invocation back.
pub fn validate_safety(env: &Env, account: &Address) -> Result<(), Error> {
    if is_liquidatable(env, account)? {
        return Err(Error::UnsafePositionRatio);
    }
    Ok(())
}

pub fn position(env: &Env, account: &Address) -> Result<Position, Error> {
    let debt_value = current_debt_value(env, account)?;
    let ratio = position_ratio(env, account)?;
    Ok(Position {
        collateral: collateral_of(env, account),
        debt_shares: debt_shares_of(env, account),
        debt_value,
        collateral_value: collateral_value(env, account)?,
        ratio,
        liquidatable: ratio_below_threshold(ratio),
    })
}
