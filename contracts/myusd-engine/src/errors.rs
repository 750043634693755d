use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    InvalidAmount = 1,
    UnsafePositionRatio = 2,
    NotLiquidatable = 3,
    InvalidBorrowRate = 4,
    NotRateController = 5,
    InsufficientCollateral = 6,
    InsufficientBalance = 7,
    InsufficientAllowance = 8,
    TransferFailed = 9,
    AlreadyInitialized = 10,
    NotInitialized = 11,
    NotAdmin = 12,
    MathOverflow = 13,
}
