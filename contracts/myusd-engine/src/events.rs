use soroban_sdk::{contractevent, Address};

/// Collateral deposited; `price` is the oracle price at deposit time.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollateralAdded {
    #[topic]
    pub account: Address,
    pub amount: u128,
    pub price: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollateralWithdrawn {
    #[topic]
    pub account: Address,
    pub amount: u128,
    pub price: u128,
}

/// MyUSD minted against collateral, with the debt shares issued for it.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DebtMinted {
    #[topic]
    pub account: Address,
    pub amount: u128,
    pub shares: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DebtBurned {
    #[topic]
    pub account: Address,
    pub amount: u128,
    pub shares: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BorrowRateUpdated {
    pub rate: u32,
    pub savings_rate: u32,
}

/// Full liquidation: `debt_cleared` MyUSD burned from the liquidator,
/// `collateral_seized` sent to them.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Liquidated {
    #[topic]
    pub liquidator: Address,
    #[topic]
    pub account: Address,
    pub collateral_seized: u128,
    pub debt_cleared: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InterestAccrued {
    pub exchange_rate: u128,
    pub interest_per_share: u128,
    pub elapsed: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EngineInitialized {
    #[topic]
    pub admin: Address,
    pub rate_controller: Address,
    pub borrow_rate: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewAdmin {
    #[topic]
    pub admin: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewRateController {
    #[topic]
    pub rate_controller: Address,
}
