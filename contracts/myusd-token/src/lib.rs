#![no_std]
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, String};
use stellar_tokens::fungible::burnable::emit_burn;
use stellar_tokens::fungible::Base as TokenBase;

const TTL_THRESHOLD: u32 = 100_000;
const TTL_EXTEND_TO: u32 = 200_000;

#[contracttype]
pub enum DataKey {
    Admin,
    Minter, // Address allowed to call mint_to (the engine)
}

/// MyUSD stablecoin ledger. Supply is created only by the configured minter
/// and destroyed either by the holder or by an approved spender.
#[contract]
pub struct MyUsdToken;

#[contractimpl]
impl MyUsdToken {
    pub fn initialize(env: Env, admin: Address, name: String, symbol: String, decimals: u32) {
        if env
            .storage()
            .persistent()
            .get::<_, Address>(&DataKey::Admin)
            .is_some()
        {
            panic!("already initialized");
        }
        admin.require_auth();
        TokenBase::set_metadata(&env, decimals, name, symbol);
        env.storage().persistent().set(&DataKey::Admin, &admin);
        bump_ttl(&env);
    }

    /// Admin: hand minting rights to `minter`.
    pub fn set_minter(env: Env, minter: Address) {
        require_admin(&env);
        env.storage().persistent().set(&DataKey::Minter, &minter);
        bump_ttl(&env);
    }

    pub fn set_admin(env: Env, new_admin: Address) {
        require_admin(&env);
        env.storage().persistent().set(&DataKey::Admin, &new_admin);
    }

    pub fn get_admin(env: Env) -> Address {
        bump_ttl(&env);
        env.storage()
            .persistent()
            .get(&DataKey::Admin)
            .expect("no admin")
    }

    pub fn get_minter(env: Env) -> Option<Address> {
        bump_ttl(&env);
        env.storage().persistent().get(&DataKey::Minter)
    }

    pub fn name(env: Env) -> String {
        TokenBase::name(&env)
    }

    pub fn symbol(env: Env) -> String {
        TokenBase::symbol(&env)
    }

    pub fn decimals(env: Env) -> u32 {
        TokenBase::decimals(&env)
    }

    pub fn total_supply(env: Env) -> i128 {
        TokenBase::total_supply(&env)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        TokenBase::balance(&env, &id)
    }

    pub fn allowance(env: Env, owner: Address, spender: Address) -> i128 {
        TokenBase::allowance(&env, &owner, &spender)
    }

    pub fn approve(
        env: Env,
        owner: Address,
        spender: Address,
        amount: i128,
        live_until_ledger: u32,
    ) {
        if amount < 0 {
            panic!("bad amount");
        }
        TokenBase::approve(&env, &owner, &spender, amount, live_until_ledger);
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        if amount <= 0 {
            panic!("bad amount");
        }
        TokenBase::transfer(&env, &from, &to, amount);
    }

    pub fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        if amount <= 0 {
            panic!("bad amount");
        }
        TokenBase::transfer_from(&env, &spender, &from, &to, amount);
    }

    /// Minter only: create `amount` MyUSD for `to`.
    pub fn mint_to(env: Env, to: Address, amount: i128) {
        let minter: Address = env
            .storage()
            .persistent()
            .get(&DataKey::Minter)
            .expect("minter not set");
        minter.require_auth();
        if amount <= 0 {
            panic!("bad amount");
        }
        bump_ttl(&env);
        TokenBase::mint(&env, &to, amount);
    }

    pub fn burn(env: Env, from: Address, amount: i128) {
        from.require_auth();
        if amount <= 0 {
            panic!("bad amount");
        }
        let current = TokenBase::balance(&env, &from);
        if current < amount {
            panic!("insufficient balance");
        }
        TokenBase::update(&env, Some(&from), None, amount);
        emit_burn(&env, &from, amount);
    }

    /// Burn `amount` from `from` using the allowance granted to `spender`.
    pub fn burn_from(env: Env, spender: Address, from: Address, amount: i128) {
        if amount <= 0 {
            panic!("bad amount");
        }
        if TokenBase::balance(&env, &from) < amount {
            panic!("insufficient balance");
        }
        if TokenBase::allowance(&env, &from, &spender) < amount {
            panic!("insufficient allowance");
        }
        TokenBase::burn_from(&env, &spender, &from, amount);
    }
}

fn require_admin(env: &Env) -> Address {
    let admin: Address = env
        .storage()
        .persistent()
        .get(&DataKey::Admin)
        .expect("no admin");
    admin.require_auth();
    admin
}

fn bump_ttl(env: &Env) {
    let persistent = env.storage().persistent();
    if persistent.has(&DataKey::Admin) {
        persistent.extend_ttl(&DataKey::Admin, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    if persistent.has(&DataKey::Minter) {
        persistent.extend_ttl(&DataKey::Minter, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}
