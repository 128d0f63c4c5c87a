use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MathError {
    #[error("Math error - overflow")]
    Overflow,
    #[error("Math error - underflow")]
    Underflow,
    #[error("Math error - out of bounds")]
    OutOfBounds,
    #[error("Math error - division by zero")]
    DivisionByZero,
    #[error("BitMath error - zero input value")]
    ZeroValue,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("State error - sqrtPrice out of bounds")]
    SqrtPriceOutOfBounds,
    #[error("State error - sqrtPrice is 0")]
    SqrtPriceIsZero,
    #[error("State error - sqrtRatio is 0")]
    SqrtRatioIsZero,

    #[error("State error - tick out of bounds")]
    TickOutOfBounds,

    #[error("State error - price range is inverted or degenerate")]
    InvalidRange,

    #[error("State error - liquidity is 0")]
    LiquidityIsZero,

    #[error("State error - requested amount exceeds pool reserves")]
    InsufficientReserves,
}

/// Failures raised while simulating a swap against a pool snapshot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SwapError {
    #[error("Swap error - amount specified is 0")]
    AmountSpecifiedIsZero,
    #[error("Swap error - amount exceeds the signed 256-bit range")]
    AmountTooLarge,
    #[error("Swap error - pool has no active liquidity")]
    LiquidityIsZero,
    #[error("Swap error - sqrtPrice limit out of bounds")]
    SqrtPriceOutOfBounds,
    #[error("Swap error - tick-walk exceeded {0} steps")]
    StepLimitExceeded(usize),
}

/// Failures raised by the optimal-split solver and the swap-and-deposit
/// executor.
///
/// The mismatch variants are invariant checks: the simulated plan and the
/// executed result must agree exactly, so any divergence means a bug or a
/// reentrant state change and the whole operation is aborted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Engine error - input amount is 0")]
    ZeroAmount,
    #[error("Engine error - no candidate yields positive liquidity")]
    ZeroLiquidity,
    #[error("Engine error - slippage bound must be in (0, 100%)")]
    InvalidSlippage,
    #[error("Engine error - token pair does not match pool")]
    TokenMismatch,
    #[error("Engine error - executed swap amounts diverge from plan")]
    AmountMismatch,
    #[error("Engine error - realized liquidity {actual} diverges from planned {expected}")]
    LiquidityMismatch { expected: u128, actual: u128 },
    #[error("Engine error - realized spare amounts diverge from plan")]
    SpareAmountMismatch,
    #[error("Engine error - reentrant invocation rejected")]
    ReentrantCall,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    MathError(#[from] crate::error::MathError),

    #[error(transparent)]
    StateError(#[from] crate::error::StateError),

    #[error(transparent)]
    SwapError(#[from] crate::error::SwapError),

    #[error(transparent)]
    EngineError(#[from] crate::error::EngineError),
}
