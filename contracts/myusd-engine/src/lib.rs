#![no_std]

mod accrual;
mod constants;
mod contract;
mod errors;
mod events;
mod health;
mod helpers;
mod storage;

pub use crate::constants::{
    COLLATERAL_RATIO_THRESHOLD, LIQUIDATOR_REWARD_RATE, PRECISION, SECONDS_PER_YEAR,
};
pub use crate::contract::{MyUsdEngine, MyUsdEngineClient};
pub use crate::errors::Error;
pub use crate::storage::{EngineConfig, Position};
