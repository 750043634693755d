use soroban_sdk::{contract, contractimpl, Address, BytesN, Env};

use crate::accrual;
use crate::constants::*;
use crate::errors::Error;
use crate::events::*;
use crate::health;
use crate::helpers::*;
use crate::storage::*;

#[contract]
pub struct MyUsdEngine;

#[contractimpl]
impl MyUsdEngine {
    /// Wire the engine to its collaborators. `borrow_rate` is in basis points
    /// per year and must not undercut the savings rate.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        admin: Address,
        collateral_token: Address,
        stablecoin: Address,
        oracle: Address,
        savings_module: Address,
        rate_controller: Address,
        borrow_rate: u32,
    ) -> Result<(), Error> {
        if is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();
        let savings_rate = SavingsModuleClient::new(&env, &savings_module).savings_rate();
        if borrow_rate < savings_rate {
            return Err(Error::InvalidBorrowRate);
        }

        write_address(&env, &DataKey::Admin, &admin);
        write_address(&env, &DataKey::RateController, &rate_controller);
        write_address(&env, &DataKey::CollateralToken, &collateral_token);
        write_address(&env, &DataKey::Stablecoin, &stablecoin);
        write_address(&env, &DataKey::Oracle, &oracle);
        write_address(&env, &DataKey::SavingsModule, &savings_module);
        write_borrow_rate(&env, borrow_rate);

        // One share is worth one MyUSD until interest accrues
        set_total_debt_shares(&env, 0u128);
        set_debt_exchange_rate(&env, PRECISION);
        set_last_accrual_time(&env, env.ledger().timestamp());

        env.storage().persistent().set(&DataKey::Initialized, &true);
        bump_core_ttl(&env);
        bump_debt_state_ttl(&env);

        EngineInitialized {
            admin,
            rate_controller,
            borrow_rate,
        }
        .publish(&env);
        Ok(())
    }

    // Collateral ledger

    /// Deposit `amount` of the collateral asset from `caller`.
    pub fn add_collateral(env: Env, caller: Address, amount: u128) -> Result<(), Error> {
        ensure_initialized(&env)?;
        caller.require_auth();
        if amount == 0 {
            return Err(Error::InvalidAmount);
        }
        receive_collateral(&env, &caller, amount)?;
        let balance = collateral_of(&env, &caller)
            .checked_add(amount)
            .ok_or(Error::MathOverflow)?;
        set_collateral(&env, &caller, balance);

        CollateralAdded {
            account: caller,
            amount,
            price: oracle_price(&env)?,
        }
        .publish(&env);
        Ok(())
    }

    /// Withdraw collateral. Debt-bearing accounts must stay at or above the
    /// collateralization threshold afterwards.
    pub fn withdraw_collateral(env: Env, caller: Address, amount: u128) -> Result<(), Error> {
        ensure_initialized(&env)?;
        caller.require_auth();
        if amount == 0 {
            return Err(Error::InvalidAmount);
        }
        accrual::accrue(&env)?;
        let balance = collateral_of(&env, &caller);
        if amount > balance {
            return Err(Error::InsufficientCollateral);
        }
        set_collateral(&env, &caller, balance - amount);
        if debt_shares_of(&env, &caller) > 0 {
            health::validate_safety(&env, &caller)?;
        }
        send_collateral(&env, &caller, amount)?;

        CollateralWithdrawn {
            account: caller,
            amount,
            price: oracle_price(&env)?,
        }
        .publish(&env);
        Ok(())
    }

    pub fn calculate_collateral_value(env: Env, account: Address) -> Result<u128, Error> {
        ensure_initialized(&env)?;
        health::collateral_value(&env, &account)
    }

    // Debt

    /// Borrow `amount` MyUSD against the caller's collateral. Returns the debt
    /// shares issued.
    pub fn mint_myusd(env: Env, caller: Address, amount: u128) -> Result<u128, Error> {
        ensure_initialized(&env)?;
        caller.require_auth();
        if amount == 0 {
            return Err(Error::InvalidAmount);
        }
        accrual::accrue(&env)?;
        let shares = accrual::amount_to_shares(&env, amount)?;
        if shares == 0 {
            return Err(Error::InvalidAmount);
        }
        accrual::issue_shares(&env, &caller, shares)?;
        health::validate_safety(&env, &caller)?;

        stablecoin_client(&env)?.mint_to(&caller, &to_i128(amount)?);

        DebtMinted {
            account: caller,
            amount,
            shares,
        }
        .publish(&env);
        Ok(shares)
    }

    /// Repay up to `amount` MyUSD of the caller's debt. Requests above the
    /// outstanding debt are clamped to the exact current debt value. Returns
    /// the amount burned.
    pub fn repay_up_to(env: Env, caller: Address, amount: u128) -> Result<u128, Error> {
        ensure_initialized(&env)?;
        caller.require_auth();
        if amount == 0 {
            return Err(Error::InvalidAmount);
        }
        accrual::accrue(&env)?;
        let held_shares = debt_shares_of(&env, &caller);
        let mut amount = amount;
        let mut shares = accrual::amount_to_shares(&env, amount)?;
        if shares > held_shares {
            shares = held_shares;
            amount = accrual::current_debt_value(&env, &caller)?;
        }
        if amount == 0 {
            return Ok(0);
        }

        let stablecoin = stablecoin_client(&env)?;
        ensure_burnable(&env, &stablecoin, &caller, amount)?;
        accrual::retire_shares(&env, &caller, shares)?;
        burn_stablecoin(&env, &stablecoin, &caller, amount)?;

        DebtBurned {
            account: caller,
            amount,
            shares,
        }
        .publish(&env);
        Ok(amount)
    }

    pub fn get_current_debt_value(env: Env, account: Address) -> Result<u128, Error> {
        ensure_initialized(&env)?;
        accrual::current_debt_value(&env, &account)
    }

    /// Permissionless accrual checkpoint. Returns the stored exchange rate.
    pub fn accrue(env: Env) -> Result<u128, Error> {
        ensure_initialized(&env)?;
        accrual::accrue(&env)
    }

    pub fn current_exchange_rate(env: Env) -> Result<u128, Error> {
        ensure_initialized(&env)?;
        accrual::current_exchange_rate(&env)
    }

    // Position health

    pub fn calculate_position_ratio(env: Env, account: Address) -> Result<u128, Error> {
        ensure_initialized(&env)?;
        health::position_ratio(&env, &account)
    }

    pub fn is_liquidatable(env: Env, account: Address) -> Result<bool, Error> {
        ensure_initialized(&env)?;
        health::is_liquidatable(&env, &account)
    }

    pub fn get_position(env: Env, account: Address) -> Result<Position, Error> {
        ensure_initialized(&env)?;
        health::position(&env, &account)
    }

    // Liquidation

    /// Close `account`'s position in full. The liquidator burns the whole debt
    /// value and receives the matching collateral plus the reward, capped at
    /// what the account holds. Returns the collateral sent to the liquidator.
    pub fn liquidate(env: Env, liquidator: Address, account: Address) -> Result<u128, Error> {
        ensure_initialized(&env)?;
        liquidator.require_auth();
        accrual::accrue(&env)?;
        if !health::is_liquidatable(&env, &account)? {
            return Err(Error::NotLiquidatable);
        }

        let debt_value = accrual::current_debt_value(&env, &account)?;
        let account_collateral = collateral_of(&env, &account);
        let collateral_value =
            health::collateral_value_at(&env, account_collateral, oracle_price(&env)?)?;

        let stablecoin = stablecoin_client(&env)?;
        ensure_burnable(&env, &stablecoin, &liquidator, debt_value)?;
        burn_stablecoin(&env, &stablecoin, &liquidator, debt_value)?;

        let shares = debt_shares_of(&env, &account);
        accrual::retire_shares(&env, &account, shares)?;

        // Capped at the account's collateral; saturates after a price collapse
        let collateral_to_cover = if collateral_value == 0 {
            account_collateral
        } else {
            mul_div_saturating(&env, debt_value, account_collateral, collateral_value)
                .min(account_collateral)
        };
        let reward = mul_div(&env, collateral_to_cover, LIQUIDATOR_REWARD_RATE, PERCENT)?;
        let seized = collateral_to_cover
            .saturating_add(reward)
            .min(account_collateral);

        set_collateral(&env, &account, account_collateral - seized);
        send_collateral(&env, &liquidator, seized)?;

        Liquidated {
            liquidator,
            account,
            collateral_seized: seized,
            debt_cleared: debt_value,
        }
        .publish(&env);
        Ok(seized)
    }

    // Rate control

    /// Rate controller only. Interest up to now is locked in at the old rate.
    pub fn set_borrow_rate(env: Env, caller: Address, new_rate: u32) -> Result<(), Error> {
        ensure_initialized(&env)?;
        let controller = read_address(&env, &DataKey::RateController)?;
        if caller != controller {
            return Err(Error::NotRateController);
        }
        caller.require_auth();
        accrual::accrue(&env)?;

        let savings_module = read_address(&env, &DataKey::SavingsModule)?;
        let savings_rate = SavingsModuleClient::new(&env, &savings_module).savings_rate();
        if new_rate < savings_rate {
            return Err(Error::InvalidBorrowRate);
        }
        write_borrow_rate(&env, new_rate);

        BorrowRateUpdated {
            rate: new_rate,
            savings_rate,
        }
        .publish(&env);
        Ok(())
    }

    pub fn get_borrow_rate(env: Env) -> Result<u32, Error> {
        ensure_initialized(&env)?;
        Ok(borrow_rate(&env))
    }

    // Admin

    pub fn set_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), Error> {
        ensure_initialized(&env)?;
        require_admin(&env, &caller)?;
        write_address(&env, &DataKey::Admin, &new_admin);
        NewAdmin { admin: new_admin }.publish(&env);
        Ok(())
    }

    pub fn set_rate_controller(env: Env, caller: Address, controller: Address) -> Result<(), Error> {
        ensure_initialized(&env)?;
        require_admin(&env, &caller)?;
        write_address(&env, &DataKey::RateController, &controller);
        NewRateController {
            rate_controller: controller,
        }
        .publish(&env);
        Ok(())
    }

    /// Admin: upgrade contract code
    pub fn upgrade_wasm(env: Env, caller: Address, new_wasm_hash: BytesN<32>) -> Result<(), Error> {
        ensure_initialized(&env)?;
        require_admin(&env, &caller)?;
        env.deployer().update_current_contract_wasm(new_wasm_hash);
        Ok(())
    }

    // Views

    pub fn get_config(env: Env) -> Result<EngineConfig, Error> {
        ensure_initialized(&env)?;
        read_config(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, Error> {
        ensure_initialized(&env)?;
        read_address(&env, &DataKey::Admin)
    }

    pub fn get_rate_controller(env: Env) -> Result<Address, Error> {
        ensure_initialized(&env)?;
        read_address(&env, &DataKey::RateController)
    }

    pub fn get_collateral(env: Env, account: Address) -> u128 {
        collateral_of(&env, &account)
    }

    pub fn get_debt_shares(env: Env, account: Address) -> u128 {
        debt_shares_of(&env, &account)
    }

    pub fn get_total_debt_shares(env: Env) -> u128 {
        total_debt_shares(&env)
    }

    pub fn get_total_debt_value(env: Env) -> Result<u128, Error> {
        ensure_initialized(&env)?;
        accrual::shares_to_amount(&env, total_debt_shares(&env))
    }

    /// Exchange rate as of the last checkpoint.
    pub fn get_debt_exchange_rate(env: Env) -> Result<u128, Error> {
        ensure_initialized(&env)?;
        debt_exchange_rate(&env)
    }

    pub fn get_last_accrual_time(env: Env) -> Result<u64, Error> {
        ensure_initialized(&env)?;
        last_accrual_time(&env)
    }
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    let admin = read_address(env, &DataKey::Admin)?;
    if *caller != admin {
        return Err(Error::NotAdmin);
    }
    caller.require_auth();
    Ok(())
}
