use crate::error::Error;
use crate::math::full_math::{mul_div, mul_div_rounding_up};
use crate::math::sqrt_price_math::{
    get_amount_0_delta, get_amount_1_delta, get_next_sqrt_price_from_input,
    get_next_sqrt_price_from_output,
};
use alloy_primitives::{I256, U256};

/// Fee denominator: fees are expressed in hundredths of a bip.
const FEE_DENOMINATOR: U256 = U256::from_limbs([1_000_000, 0, 0, 0]);

/// Computes a single step of a swap within one tick range.
///
/// The direction is inferred from the ordering of current and target
/// prices; the sign of `amount_remaining` selects exact-input (positive)
/// or exact-output (negative). Rounding is conservative in every branch:
/// the step never claims more output or less input than a real pool would.
///
/// Returns `(sqrt_price_next, amount_in, amount_out, fee_amount)` where
/// `sqrt_price_next` never exceeds the target.
pub fn compute_swap_step(
    sqrt_price_current_x96: U256,
    sqrt_price_target_x96: U256,
    liquidity: u128,
    amount_remaining: I256,
    fee_pips: u32,
) -> Result<(U256, U256, U256, U256), Error> {
    let fee = U256::from(fee_pips);
    let fee_complement = FEE_DENOMINATOR - fee;
    let zero_for_one = sqrt_price_current_x96 >= sqrt_price_target_x96;
    let exact_in = amount_remaining >= I256::ZERO;

    let sqrt_price_next_x96: U256;
    let mut amount_in: U256;
    let mut amount_out: U256;
    let fee_amount: U256;

    if exact_in {
        let amount_remaining_abs = amount_remaining.into_raw();
        let amount_remaining_less_fee =
            mul_div(amount_remaining_abs, fee_complement, FEE_DENOMINATOR)?;

        // input the full move to the target would consume
        amount_in = if zero_for_one {
            get_amount_0_delta(
                sqrt_price_target_x96,
                sqrt_price_current_x96,
                liquidity,
                true,
            )?
        } else {
            get_amount_1_delta(
                sqrt_price_current_x96,
                sqrt_price_target_x96,
                liquidity,
                true,
            )?
        };

        if amount_remaining_less_fee >= amount_in {
            sqrt_price_next_x96 = sqrt_price_target_x96;
            fee_amount = mul_div_rounding_up(amount_in, fee, fee_complement)?;
        } else {
            amount_in = amount_remaining_less_fee;
            sqrt_price_next_x96 = get_next_sqrt_price_from_input(
                sqrt_price_current_x96,
                liquidity,
                amount_in,
                zero_for_one,
            )?;
            // the entire remainder beyond the consumed input is the fee
            fee_amount = amount_remaining_abs - amount_in;
        }

        amount_out = if zero_for_one {
            get_amount_1_delta(
                sqrt_price_next_x96,
                sqrt_price_current_x96,
                liquidity,
                false,
            )?
        } else {
            get_amount_0_delta(
                sqrt_price_current_x96,
                sqrt_price_next_x96,
                liquidity,
                false,
            )?
        };
    } else {
        let amount_remaining_abs = (-amount_remaining).into_raw();

        amount_out = if zero_for_one {
            get_amount_1_delta(
                sqrt_price_target_x96,
                sqrt_price_current_x96,
                liquidity,
                false,
            )?
        } else {
            get_amount_0_delta(
                sqrt_price_current_x96,
                sqrt_price_target_x96,
                liquidity,
                false,
            )?
        };

        if amount_remaining_abs >= amount_out {
            sqrt_price_next_x96 = sqrt_price_target_x96;
        } else {
            amount_out = amount_remaining_abs;
            sqrt_price_next_x96 = get_next_sqrt_price_from_output(
                sqrt_price_current_x96,
                liquidity,
                amount_out,
                zero_for_one,
            )?;
        }

        amount_in = if zero_for_one {
            get_amount_0_delta(
                sqrt_price_next_x96,
                sqrt_price_current_x96,
                liquidity,
                true,
            )?
        } else {
            get_amount_1_delta(
                sqrt_price_current_x96,
                sqrt_price_next_x96,
                liquidity,
                true,
            )?
        };
        fee_amount = mul_div_rounding_up(amount_in, fee, fee_complement)?;
    }

    // exact-output swaps cap the output at the request
    if !exact_in && amount_out > (-amount_remaining).into_raw() {
        amount_out = (-amount_remaining).into_raw();
    }

    Ok((sqrt_price_next_x96, amount_in, amount_out, fee_amount))
}
