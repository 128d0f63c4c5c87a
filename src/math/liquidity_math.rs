use crate::error::{Error, MathError, StateError};
use crate::math::full_math::mul_div;
use crate::math::sqrt_price_math::{get_amount_0_delta, get_amount_1_delta};
use crate::Q96;
use alloy_primitives::U256;

/// Applies a signed liquidity-net change to an unsigned liquidity figure,
/// used when crossing initialized ticks.
pub fn add_delta(x: u128, y: i128) -> Result<u128, MathError> {
    if y < 0 {
        x.checked_sub(y.unsigned_abs())
            .ok_or(MathError::Underflow)
    } else {
        x.checked_add(y as u128).ok_or(MathError::Overflow)
    }
}

fn checked_range(sqrt_ratio_a_x96: U256, sqrt_ratio_b_x96: U256) -> Result<U256, Error> {
    if sqrt_ratio_a_x96 >= sqrt_ratio_b_x96 || sqrt_ratio_a_x96.is_zero() {
        return Err(StateError::InvalidRange.into());
    }
    Ok(sqrt_ratio_b_x96 - sqrt_ratio_a_x96)
}

fn to_liquidity(value: U256) -> Result<u128, Error> {
    u128::try_from(value).map_err(|_| MathError::Overflow.into())
}

/// Maximum liquidity a token0 budget supports over `[sqrt_a, sqrt_b)`:
/// `L = amount0 * (sqrt_a * sqrt_b / Q96) / (sqrt_b - sqrt_a)`.
///
/// Floor rounding throughout: the result never overstates liquidity.
pub fn liquidity_for_amount_0(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount_0: U256,
) -> Result<u128, Error> {
    let range = checked_range(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;
    let intermediate = mul_div(sqrt_ratio_a_x96, sqrt_ratio_b_x96, Q96)?;
    to_liquidity(mul_div(amount_0, intermediate, range)?)
}

/// Maximum liquidity a token1 budget supports over `[sqrt_a, sqrt_b)`:
/// `L = amount1 * Q96 / (sqrt_b - sqrt_a)`.
pub fn liquidity_for_amount_1(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount_1: U256,
) -> Result<u128, Error> {
    let range = checked_range(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;
    to_liquidity(mul_div(amount_1, Q96, range)?)
}

/// Maximum liquidity both token budgets jointly support at the current
/// price. Three regimes: below the range only token0 matters, above it
/// only token1, inside it the scarcer side is the binding constraint.
pub fn liquidity_for_amounts(
    sqrt_ratio_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount_0: U256,
    amount_1: U256,
) -> Result<u128, Error> {
    checked_range(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;

    if sqrt_ratio_x96 <= sqrt_ratio_a_x96 {
        liquidity_for_amount_0(sqrt_ratio_a_x96, sqrt_ratio_b_x96, amount_0)
    } else if sqrt_ratio_x96 >= sqrt_ratio_b_x96 {
        liquidity_for_amount_1(sqrt_ratio_a_x96, sqrt_ratio_b_x96, amount_1)
    } else {
        let liquidity_0 = liquidity_for_amount_0(sqrt_ratio_x96, sqrt_ratio_b_x96, amount_0)?;
        let liquidity_1 = liquidity_for_amount_1(sqrt_ratio_a_x96, sqrt_ratio_x96, amount_1)?;
        Ok(liquidity_0.min(liquidity_1))
    }
}

/// Token amounts a liquidity figure occupies at the current price, the
/// inverse of [`liquidity_for_amounts`]. `round_up` selects the
/// pool-favoring direction (deposits round up, withdrawals round down).
pub fn amounts_for_liquidity(
    sqrt_ratio_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<(U256, U256), Error> {
    checked_range(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;

    if liquidity == 0 {
        return Ok((U256::ZERO, U256::ZERO));
    }

    if sqrt_ratio_x96 <= sqrt_ratio_a_x96 {
        let amount_0 =
            get_amount_0_delta(sqrt_ratio_a_x96, sqrt_ratio_b_x96, liquidity, round_up)?;
        Ok((amount_0, U256::ZERO))
    } else if sqrt_ratio_x96 >= sqrt_ratio_b_x96 {
        let amount_1 =
            get_amount_1_delta(sqrt_ratio_a_x96, sqrt_ratio_b_x96, liquidity, round_up)?;
        Ok((U256::ZERO, amount_1))
    } else {
        let amount_0 = get_amount_0_delta(sqrt_ratio_x96, sqrt_ratio_b_x96, liquidity, round_up)?;
        let amount_1 = get_amount_1_delta(sqrt_ratio_a_x96, sqrt_ratio_x96, liquidity, round_up)?;
        Ok((amount_0, amount_1))
    }
}
