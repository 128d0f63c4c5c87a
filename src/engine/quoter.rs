use crate::error::{EngineError, Error, SwapError};
use crate::math::full_math::{mul_div, sqrt};
use crate::math::liquidity_math::add_delta;
use crate::math::swap_math::compute_swap_step;
use crate::math::tick_bitmap::{next_initialized_tick_within_one_word, BitmapWords};
use crate::math::tick_math::{
    get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO,
    MIN_TICK,
};
use crate::pool::PoolStateReader;
use crate::{U256_1, WAD};
use alloy_primitives::{I256, U256};

/// Hard cap on tick-walk steps per quote. A well-formed pool never comes
/// close; hitting it means the state is corrupt or adversarial and the
/// quote fails with [`SwapError::StepLimitExceeded`] instead of spinning.
pub const MAX_SWAP_STEPS: usize = 512;

/// Result of simulating an exact-input swap against pool state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Input actually consumed, fee included. Less than the requested
    /// amount when the price limit cuts the swap short.
    pub amount_in_used: U256,
    /// Output produced.
    pub amount_out: U256,
    /// Portion of `amount_in_used` taken as fees.
    pub fee_amount: U256,
    /// Pool sqrt price after the simulated swap.
    pub sqrt_price_after_x96: U256,
    /// The limit the quote was bounded by.
    pub sqrt_price_limit_x96: U256,
}

struct PoolWords<'a, P: PoolStateReader>(&'a P);

impl<P: PoolStateReader> BitmapWords for PoolWords<'_, P> {
    fn word(&self, word_pos: i16) -> U256 {
        self.0.bitmap_word(word_pos)
    }
}

// running swap state, in the shape of the canonical pool implementation
struct SwapState {
    amount_specified_remaining: I256,
    amount_out: U256,
    sqrt_price_x96: U256,
    tick: i32,
    liquidity: u128,
    fee_amount: U256,
}

/// Converts a WAD-scaled slippage tolerance into a sqrt-price limit for
/// the given direction: `sqrt_price * sqrt(1 - slippage)` when selling
/// token0, `sqrt_price * sqrt(1 + slippage)` when selling token1.
///
/// The result is clamped strictly inside the global price bounds so it is
/// always a usable limit. Zero tolerance and tolerance at or above 100%
/// are rejected.
pub fn sqrt_price_limit_from_slippage(
    sqrt_price_x96: U256,
    zero_for_one: bool,
    slippage_wad: U256,
) -> Result<U256, Error> {
    if slippage_wad.is_zero() || slippage_wad >= WAD {
        return Err(EngineError::InvalidSlippage.into());
    }

    let scaled = if zero_for_one {
        (WAD - slippage_wad) * WAD
    } else {
        (WAD + slippage_wad) * WAD
    };
    // sqrt((1 ± s) * WAD^2) = WAD * sqrt(1 ± s)
    let factor = sqrt(scaled);
    let limit = mul_div(sqrt_price_x96, factor, WAD)?;

    Ok(if zero_for_one {
        limit.max(MIN_SQRT_RATIO + U256_1)
    } else {
        limit.min(MAX_SQRT_RATIO - U256_1)
    })
}

/// Simulates an exact-input swap bounded by an explicit sqrt-price limit.
///
/// The walk stops when the input is exhausted or the price reaches the
/// limit, whichever comes first; a partial fill is reported through
/// `amount_in_used`, never as an error. Pool state is only read, never
/// modified.
pub fn quote_exact_input_with_limit<P: PoolStateReader>(
    pool: &P,
    zero_for_one: bool,
    amount_in: U256,
    sqrt_price_limit_x96: U256,
) -> Result<Quote, Error> {
    if amount_in.is_zero() {
        return Err(SwapError::AmountSpecifiedIsZero.into());
    }
    // the remaining amount is tracked as a signed value
    if amount_in > I256::MAX.into_raw() {
        return Err(SwapError::AmountTooLarge.into());
    }
    if pool.liquidity() == 0 {
        return Err(SwapError::LiquidityIsZero.into());
    }

    let sqrt_price_x96 = pool.sqrt_price_x96();
    if zero_for_one {
        if sqrt_price_limit_x96 >= sqrt_price_x96 || sqrt_price_limit_x96 <= MIN_SQRT_RATIO {
            return Err(SwapError::SqrtPriceOutOfBounds.into());
        }
    } else if sqrt_price_limit_x96 <= sqrt_price_x96 || sqrt_price_limit_x96 >= MAX_SQRT_RATIO {
        return Err(SwapError::SqrtPriceOutOfBounds.into());
    }

    let bitmap = PoolWords(pool);
    let mut state = SwapState {
        amount_specified_remaining: I256::from_raw(amount_in),
        amount_out: U256::ZERO,
        sqrt_price_x96,
        tick: pool.tick(),
        liquidity: pool.liquidity(),
        fee_amount: U256::ZERO,
    };

    let mut steps = 0usize;
    while !state.amount_specified_remaining.is_zero()
        && state.sqrt_price_x96 != sqrt_price_limit_x96
    {
        if steps >= MAX_SWAP_STEPS {
            return Err(SwapError::StepLimitExceeded(MAX_SWAP_STEPS).into());
        }
        steps += 1;

        let sqrt_price_start_x96 = state.sqrt_price_x96;

        let (mut tick_next, initialized) = next_initialized_tick_within_one_word(
            &bitmap,
            state.tick,
            pool.tick_spacing(),
            zero_for_one,
        )?;
        tick_next = tick_next.clamp(MIN_TICK, MAX_TICK);
        let sqrt_price_next_x96 = get_sqrt_ratio_at_tick(tick_next)?;

        let target = if zero_for_one {
            sqrt_price_next_x96.max(sqrt_price_limit_x96)
        } else {
            sqrt_price_next_x96.min(sqrt_price_limit_x96)
        };

        let (sqrt_price_after, amount_in_step, amount_out_step, fee_step) = compute_swap_step(
            state.sqrt_price_x96,
            target,
            state.liquidity,
            state.amount_specified_remaining,
            pool.fee_pips(),
        )?;
        state.sqrt_price_x96 = sqrt_price_after;

        state.amount_specified_remaining -= I256::from_raw(amount_in_step + fee_step);
        state.amount_out += amount_out_step;
        state.fee_amount += fee_step;

        if state.sqrt_price_x96 == sqrt_price_next_x96 {
            if initialized {
                let mut liquidity_net = pool
                    .liquidity_net(tick_next)
                    .ok_or(SwapError::LiquidityIsZero)?;
                if zero_for_one {
                    liquidity_net = -liquidity_net;
                }
                state.liquidity = add_delta(state.liquidity, liquidity_net)?;
            }
            state.tick = if zero_for_one { tick_next - 1 } else { tick_next };
        } else if state.sqrt_price_x96 != sqrt_price_start_x96 {
            state.tick = get_tick_at_sqrt_ratio(state.sqrt_price_x96)?;
        }
    }

    let quote = Quote {
        amount_in_used: amount_in - state.amount_specified_remaining.into_raw(),
        amount_out: state.amount_out,
        fee_amount: state.fee_amount,
        sqrt_price_after_x96: state.sqrt_price_x96,
        sqrt_price_limit_x96,
    };
    log::trace!(
        "quote zero_for_one={} in={} used={} out={} steps={}",
        zero_for_one,
        amount_in,
        quote.amount_in_used,
        quote.amount_out,
        steps
    );
    Ok(quote)
}

/// Simulates an exact-input swap with the limit derived from a WAD-scaled
/// slippage tolerance.
pub fn quote_exact_input<P: PoolStateReader>(
    pool: &P,
    zero_for_one: bool,
    amount_in: U256,
    slippage_wad: U256,
) -> Result<Quote, Error> {
    let limit = sqrt_price_limit_from_slippage(pool.sqrt_price_x96(), zero_for_one, slippage_wad)?;
    quote_exact_input_with_limit(pool, zero_for_one, amount_in, limit)
}
