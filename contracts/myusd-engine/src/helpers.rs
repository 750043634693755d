use soroban_sdk::{log, token, Address, Env, U256};

use crate::errors::Error;
use crate::storage::{read_address, DataKey, PriceOracleClient, StablecoinClient};

/// `a * b / denominator` with a 256-bit intermediate product, floor rounding.
pub fn mul_div(env: &Env, a: u128, b: u128, denominator: u128) -> Result<u128, Error> {
    if denominator == 0 {
        return Err(Error::MathOverflow);
    }
    U256::from_u128(env, a)
        .mul(&U256::from_u128(env, b))
        .div(&U256::from_u128(env, denominator))
        .to_u128()
        .ok_or(Error::MathOverflow)
}

/// Same as `mul_div` but clamps an oversized quotient to `u128::MAX`.
pub fn mul_div_saturating(env: &Env, a: u128, b: u128, denominator: u128) -> u128 {
    if denominator == 0 {
        return u128::MAX;
    }
    U256::from_u128(env, a)
        .mul(&U256::from_u128(env, b))
        .div(&U256::from_u128(env, denominator))
        .to_u128()
        .unwrap_or(u128::MAX)
}

pub fn to_i128(amount: u128) -> Result<i128, Error> {
    i128::try_from(amount).map_err(|_| Error::MathOverflow)
}

pub fn oracle_price(env: &Env) -> Result<u128, Error> {
    let oracle = read_address(env, &DataKey::Oracle)?;
    Ok(PriceOracleClient::new(env, &oracle).get_price())
}

pub fn stablecoin_client(env: &Env) -> Result<StablecoinClient<'_>, Error> {
    let stablecoin = read_address(env, &DataKey::Stablecoin)?;
    Ok(StablecoinClient::new(env, &stablecoin))
}

/// Checks that `owner` holds `amount` MyUSD and lets the engine burn it.
pub fn ensure_burnable(
    env: &Env,
    stablecoin: &StablecoinClient,
    owner: &Address,
    amount: u128,
) -> Result<i128, Error> {
    let amount = to_i128(amount)?;
    if stablecoin.balance(owner) < amount {
        return Err(Error::InsufficientBalance);
    }
    if stablecoin.allowance(owner, &env.current_contract_address()) < amount {
        return Err(Error::InsufficientAllowance);
    }
    Ok(amount)
}

/// Burn through the engine's allowance; callers run `ensure_burnable` first.
pub fn burn_stablecoin(
    env: &Env,
    stablecoin: &StablecoinClient,
    owner: &Address,
    amount: u128,
) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }
    stablecoin.burn_from(&env.current_contract_address(), owner, &to_i128(amount)?);
    Ok(())
}

/// Pull `amount` collateral from `from` into the engine.
pub fn receive_collateral(env: &Env, from: &Address, amount: u128) -> Result<(), Error> {
    let token_address = read_address(env, &DataKey::CollateralToken)?;
    let token_client = token::Client::new(env, &token_address);
    token_client.transfer(from, &env.current_contract_address(), &to_i128(amount)?);
    Ok(())
}

/// Send `amount` collateral out of the engine; a failed transfer is reported
/// as `TransferFailed` so the caller's invocation rolls back.
pub fn send_collateral(env: &Env, to: &Address, amount: u128) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }
    let token_address = read_address(env, &DataKey::CollateralToken)?;
    let token_client = token::Client::new(env, &token_address);
    let amount_i128 = to_i128(amount)?;
    match token_client.try_transfer(&env.current_contract_address(), to, &amount_i128) {
        Ok(Ok(_)) => Ok(()),
        _ => {
            log!(env, "collateral transfer failed", to.clone(), amount);
            Err(Error::TransferFailed)
        }
    }
}
