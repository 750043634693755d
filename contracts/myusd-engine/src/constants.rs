pub const PRECISION: u128 = 1_000_000_000_000_000_000u128; // 1e18
pub const COLLATERAL_RATIO_THRESHOLD: u128 = 150; // percent
pub const LIQUIDATOR_REWARD_RATE: u128 = 10; // percent
pub const PERCENT: u128 = 100;
pub const BASIS_POINTS: u128 = 10_000;
pub const SECONDS_PER_YEAR: u128 = 365 * 24 * 60 * 60;
pub const MAX_POSITION_RATIO: u128 = u128::MAX;
pub const TTL_THRESHOLD: u32 = 100_000;
pub const TTL_EXTEND_TO: u32 = 200_000;
