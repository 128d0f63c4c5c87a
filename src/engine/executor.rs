use crate::engine::solver::{plan, LpSwapParams, LpSwapQuote};
use crate::error::{EngineError, Error};
use crate::pool::PoolStateReader;
use alloy_primitives::{Address, U256};

/// Executes the swap leg of a deposit. Returns the input actually
/// consumed and the output received.
pub trait SwapVenue {
    fn execute_swap(
        &mut self,
        token_in: Address,
        token_out: Address,
        amount_in: U256,
        sqrt_price_limit_x96: U256,
    ) -> Result<(U256, U256), Error>;
}

/// Mints liquidity into an existing position from token budgets. Returns
/// the liquidity minted and the amounts actually pulled from each budget.
pub trait PositionManager {
    fn increase_liquidity(
        &mut self,
        position_id: u64,
        amount_0_desired: U256,
        amount_1_desired: U256,
    ) -> Result<(u128, U256, U256), Error>;
}

/// A swap-and-deposit request: the split parameters plus the position
/// receiving the minted liquidity.
#[derive(Debug, Clone, Copy)]
pub struct DepositRequest {
    pub params: LpSwapParams,
    pub position_id: u64,
}

/// What a completed deposit produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositOutcome {
    pub liquidity_delta: u128,
    /// Input-token remainder returned to the caller.
    pub spare_in: U256,
    /// Output-token remainder returned to the caller.
    pub spare_out: U256,
}

/// Runs planned deposits against a venue and a position manager, holding
/// execution to the plan exactly: any divergence between what the plan
/// promised and what the venue or manager delivered aborts the deposit.
#[derive(Debug, Default)]
pub struct Executor {
    in_progress: bool,
}

impl Executor {
    pub fn new() -> Self {
        Self { in_progress: false }
    }

    /// Plans the split against `pool`, executes the swap leg on `venue`,
    /// and mints liquidity through `positions`.
    ///
    /// `pool` must reflect the state the venue will execute against;
    /// checks-effects-interactions order applies, and a nested call while
    /// a deposit is running fails with `ReentrantCall`.
    pub fn execute<P, V, M>(
        &mut self,
        pool: &P,
        venue: &mut V,
        positions: &mut M,
        request: &DepositRequest,
    ) -> Result<DepositOutcome, Error>
    where
        P: PoolStateReader,
        V: SwapVenue,
        M: PositionManager,
    {
        if self.in_progress {
            return Err(EngineError::ReentrantCall.into());
        }
        self.in_progress = true;
        let result = self.run(pool, venue, positions, request);
        self.in_progress = false;
        result
    }

    fn run<P, V, M>(
        &mut self,
        pool: &P,
        venue: &mut V,
        positions: &mut M,
        request: &DepositRequest,
    ) -> Result<DepositOutcome, Error>
    where
        P: PoolStateReader,
        V: SwapVenue,
        M: PositionManager,
    {
        let params = &request.params;
        let planned: LpSwapQuote = plan(pool, params)?;

        let (swap_used, swap_out) = if planned.amount_swap_in.is_zero() {
            (U256::ZERO, U256::ZERO)
        } else {
            let (used, out) = venue.execute_swap(
                params.token_in,
                params.token_out,
                planned.amount_swap_in,
                planned.sqrt_price_limit_x96,
            )?;
            if used != planned.amount_swap_in || out != planned.amount_swap_out {
                return Err(EngineError::AmountMismatch.into());
            }
            (used, out)
        };

        let held = params.amount_in - swap_used;
        let (desired_0, desired_1) = if planned.zero_for_one {
            (held, swap_out)
        } else {
            (swap_out, held)
        };

        let (liquidity, used_0, used_1) =
            positions.increase_liquidity(request.position_id, desired_0, desired_1)?;
        if liquidity != planned.liquidity_delta {
            return Err(EngineError::LiquidityMismatch {
                expected: planned.liquidity_delta,
                actual: liquidity,
            }
            .into());
        }

        let spare_0 = desired_0
            .checked_sub(used_0)
            .ok_or(EngineError::AmountMismatch)?;
        let spare_1 = desired_1
            .checked_sub(used_1)
            .ok_or(EngineError::AmountMismatch)?;
        let (spare_in, spare_out) = if planned.zero_for_one {
            (spare_0, spare_1)
        } else {
            (spare_1, spare_0)
        };
        if spare_in != planned.spare_in || spare_out != planned.spare_out {
            return Err(EngineError::SpareAmountMismatch.into());
        }

        log::debug!(
            "deposit into position {}: minted {} liquidity, swapped {}, spares ({}, {})",
            request.position_id,
            liquidity,
            swap_used,
            spare_in,
            spare_out
        );
        Ok(DepositOutcome {
            liquidity_delta: liquidity,
            spare_in,
            spare_out,
        })
    }
}
