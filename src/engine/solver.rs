use crate::error::{EngineError, Error, StateError};
use crate::engine::quoter::{
    quote_exact_input_with_limit, sqrt_price_limit_from_slippage, Quote,
};
use crate::math::liquidity_math::{
    amounts_for_liquidity, liquidity_for_amount_0, liquidity_for_amount_1, liquidity_for_amounts,
};
use crate::math::tick_math::get_sqrt_ratio_at_tick;
use crate::pool::PoolStateReader;
use crate::U256_1;
use alloy_primitives::{Address, U256};

/// Hard cap on binary-search iterations. The search halves an integer
/// interval, so it converges in at most 256 steps for any input; the cap
/// turns a logic regression into a logged degradation instead of a hang.
pub const MAX_SEARCH_ITERATIONS: usize = 256;

/// A single-token budget to be turned into liquidity over a tick range.
#[derive(Debug, Clone, Copy)]
pub struct LpSwapParams {
    pub token_in: Address,
    pub token_out: Address,
    /// Total input budget, split between the swap and the deposit.
    pub amount_in: U256,
    /// WAD-scaled slippage tolerance bounding the swap leg.
    pub slippage_wad: U256,
    pub tick_lower: i32,
    pub tick_upper: i32,
}

/// The planned split: how much to swap, what the swap yields, and the
/// liquidity the combined budgets mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LpSwapQuote {
    /// Swap direction relative to the pool's token ordering.
    pub zero_for_one: bool,
    /// Input routed through the swap, fees included. Zero when the range
    /// is single-sided in the input token.
    pub amount_swap_in: U256,
    /// Output the swap yields.
    pub amount_swap_out: U256,
    /// Liquidity the deposit mints.
    pub liquidity_delta: u128,
    /// Pool sqrt price after the swap leg.
    pub sqrt_price_after_x96: U256,
    /// The slippage-derived price limit the swap was bounded by.
    pub sqrt_price_limit_x96: U256,
    /// Input-token remainder neither swapped nor deposited.
    pub spare_in: U256,
    /// Output-token remainder not deposited.
    pub spare_out: U256,
}

struct Candidate {
    quote: Quote,
    budget_0: U256,
    budget_1: U256,
    liquidity: u128,
}

enum Steer {
    More,
    Less,
    Stop,
}

fn evaluate<P: PoolStateReader>(
    pool: &P,
    zero_for_one: bool,
    swap_amount: U256,
    amount_in: U256,
    sqrt_price_limit_x96: U256,
    sqrt_ratio_lower_x96: U256,
    sqrt_ratio_upper_x96: U256,
) -> Result<Candidate, Error> {
    let quote = quote_exact_input_with_limit(pool, zero_for_one, swap_amount, sqrt_price_limit_x96)?;
    let held = amount_in - quote.amount_in_used;
    let (budget_0, budget_1) = if zero_for_one {
        (held, quote.amount_out)
    } else {
        (quote.amount_out, held)
    };
    let liquidity = liquidity_for_amounts(
        quote.sqrt_price_after_x96,
        sqrt_ratio_lower_x96,
        sqrt_ratio_upper_x96,
        budget_0,
        budget_1,
    )?;
    Ok(Candidate {
        quote,
        budget_0,
        budget_1,
        liquidity,
    })
}

/// Which way to move the swap amount so the two deposit budgets support
/// equal liquidity. Both sides are monotonic in the swap amount, so the
/// comparison steers a plain bisection.
fn steer(
    candidate: &Candidate,
    zero_for_one: bool,
    sqrt_price_limit_x96: U256,
    sqrt_ratio_lower_x96: U256,
    sqrt_ratio_upper_x96: U256,
) -> Result<Steer, Error> {
    let price_after = candidate.quote.sqrt_price_after_x96;

    let direction = if zero_for_one {
        if price_after >= sqrt_ratio_upper_x96 {
            Steer::More
        } else if price_after <= sqrt_ratio_lower_x96 {
            Steer::Less
        } else {
            let liquidity_0 =
                liquidity_for_amount_0(price_after, sqrt_ratio_upper_x96, candidate.budget_0)?;
            let liquidity_1 =
                liquidity_for_amount_1(sqrt_ratio_lower_x96, price_after, candidate.budget_1)?;
            match liquidity_0.cmp(&liquidity_1) {
                std::cmp::Ordering::Greater => Steer::More,
                std::cmp::Ordering::Less => Steer::Less,
                std::cmp::Ordering::Equal => Steer::Stop,
            }
        }
    } else if price_after <= sqrt_ratio_lower_x96 {
        Steer::More
    } else if price_after >= sqrt_ratio_upper_x96 {
        Steer::Less
    } else {
        let liquidity_0 =
            liquidity_for_amount_0(price_after, sqrt_ratio_upper_x96, candidate.budget_0)?;
        let liquidity_1 =
            liquidity_for_amount_1(sqrt_ratio_lower_x96, price_after, candidate.budget_1)?;
        match liquidity_1.cmp(&liquidity_0) {
            std::cmp::Ordering::Greater => Steer::More,
            std::cmp::Ordering::Less => Steer::Less,
            std::cmp::Ordering::Equal => Steer::Stop,
        }
    };

    // once the swap leg is pinned at the price limit, a larger swap amount
    // produces the identical quote
    Ok(match direction {
        Steer::More if price_after == sqrt_price_limit_x96 => Steer::Stop,
        other => other,
    })
}

/// Finds the input split that maximizes the liquidity minted over
/// `[tick_lower, tick_upper)` from a single-token budget.
///
/// Single-sided ranges skip the swap entirely. Otherwise a bisection over
/// the swap amount balances the two deposit budgets, keeping the best
/// candidate seen; the swap leg is always bounded by the slippage-derived
/// price limit, so a thin pool degrades into a partial fill with spares
/// rather than an over-priced swap.
pub fn plan<P: PoolStateReader>(pool: &P, params: &LpSwapParams) -> Result<LpSwapQuote, Error> {
    plan_with_cap(pool, params, MAX_SEARCH_ITERATIONS)
}

fn plan_with_cap<P: PoolStateReader>(
    pool: &P,
    params: &LpSwapParams,
    iteration_cap: usize,
) -> Result<LpSwapQuote, Error> {
    if params.amount_in.is_zero() {
        return Err(EngineError::ZeroAmount.into());
    }
    if params.tick_lower >= params.tick_upper {
        return Err(StateError::InvalidRange.into());
    }

    let token_0 = pool.token0();
    let token_1 = pool.token1();
    let zero_for_one = if params.token_in == token_0 && params.token_out == token_1 {
        true
    } else if params.token_in == token_1 && params.token_out == token_0 {
        false
    } else {
        return Err(EngineError::TokenMismatch.into());
    };

    let sqrt_ratio_lower_x96 = get_sqrt_ratio_at_tick(params.tick_lower)?;
    let sqrt_ratio_upper_x96 = get_sqrt_ratio_at_tick(params.tick_upper)?;
    let sqrt_price_x96 = pool.sqrt_price_x96();

    // single-sided ranges take the whole budget without swapping
    if zero_for_one && sqrt_price_x96 <= sqrt_ratio_lower_x96 {
        return single_sided_deposit(params, pool, zero_for_one, sqrt_ratio_lower_x96, sqrt_ratio_upper_x96);
    }
    if !zero_for_one && sqrt_price_x96 >= sqrt_ratio_upper_x96 {
        return single_sided_deposit(params, pool, zero_for_one, sqrt_ratio_lower_x96, sqrt_ratio_upper_x96);
    }

    let sqrt_price_limit_x96 =
        sqrt_price_limit_from_slippage(sqrt_price_x96, zero_for_one, params.slippage_wad)?;

    fn update_best(swap_amount: U256, candidate: Candidate, best: &mut Option<(U256, Candidate)>) {
        if best
            .as_ref()
            .map(|(_, held)| candidate.liquidity > held.liquidity)
            .unwrap_or(true)
        {
            *best = Some((swap_amount, candidate));
        }
    }

    let mut low = U256_1;
    let mut high = params.amount_in;
    let mut best: Option<(U256, Candidate)> = None;

    let mut iterations = 0usize;
    while low < high {
        if iterations >= iteration_cap {
            log::warn!("split search hit the iteration cap ({iteration_cap}), using best candidate");
            break;
        }
        iterations += 1;

        let mid = (low + high) >> 1;
        let candidate = evaluate(
            pool,
            zero_for_one,
            mid,
            params.amount_in,
            sqrt_price_limit_x96,
            sqrt_ratio_lower_x96,
            sqrt_ratio_upper_x96,
        )?;
        log::trace!(
            "split iteration {iterations}: mid={mid} liquidity={}",
            candidate.liquidity
        );

        let direction = steer(
            &candidate,
            zero_for_one,
            sqrt_price_limit_x96,
            sqrt_ratio_lower_x96,
            sqrt_ratio_upper_x96,
        )?;
        update_best(mid, candidate, &mut best);

        match direction {
            Steer::More => low = mid + U256_1,
            Steer::Less => high = mid,
            Steer::Stop => break,
        }
    }

    // the converged endpoint itself was never bisected
    if best.as_ref().map(|(at, _)| *at != low).unwrap_or(true) && low <= params.amount_in {
        let candidate = evaluate(
            pool,
            zero_for_one,
            low,
            params.amount_in,
            sqrt_price_limit_x96,
            sqrt_ratio_lower_x96,
            sqrt_ratio_upper_x96,
        )?;
        update_best(low, candidate, &mut best);
    }

    let (_, candidate) = best.ok_or(EngineError::ZeroLiquidity)?;
    if candidate.liquidity == 0 {
        return Err(EngineError::ZeroLiquidity.into());
    }

    finish(params, zero_for_one, candidate, sqrt_ratio_lower_x96, sqrt_ratio_upper_x96)
}

fn single_sided_deposit<P: PoolStateReader>(
    params: &LpSwapParams,
    pool: &P,
    zero_for_one: bool,
    sqrt_ratio_lower_x96: U256,
    sqrt_ratio_upper_x96: U256,
) -> Result<LpSwapQuote, Error> {
    // the derived limit is unused for a swap-free plan, but the tolerance
    // is still validated so callers get consistent errors
    if params.slippage_wad.is_zero() || params.slippage_wad >= crate::WAD {
        return Err(EngineError::InvalidSlippage.into());
    }

    let liquidity = if zero_for_one {
        liquidity_for_amount_0(sqrt_ratio_lower_x96, sqrt_ratio_upper_x96, params.amount_in)?
    } else {
        liquidity_for_amount_1(sqrt_ratio_lower_x96, sqrt_ratio_upper_x96, params.amount_in)?
    };
    if liquidity == 0 {
        return Err(EngineError::ZeroLiquidity.into());
    }

    let candidate = Candidate {
        quote: Quote {
            amount_in_used: U256::ZERO,
            amount_out: U256::ZERO,
            fee_amount: U256::ZERO,
            sqrt_price_after_x96: pool.sqrt_price_x96(),
            sqrt_price_limit_x96: pool.sqrt_price_x96(),
        },
        budget_0: if zero_for_one { params.amount_in } else { U256::ZERO },
        budget_1: if zero_for_one { U256::ZERO } else { params.amount_in },
        liquidity,
    };
    finish(params, zero_for_one, candidate, sqrt_ratio_lower_x96, sqrt_ratio_upper_x96)
}

fn finish(
    params: &LpSwapParams,
    zero_for_one: bool,
    candidate: Candidate,
    sqrt_ratio_lower_x96: U256,
    sqrt_ratio_upper_x96: U256,
) -> Result<LpSwapQuote, Error> {
    let (required_0, required_1) = amounts_for_liquidity(
        candidate.quote.sqrt_price_after_x96,
        sqrt_ratio_lower_x96,
        sqrt_ratio_upper_x96,
        candidate.liquidity,
        true,
    )?;
    let deposited_0 = required_0.min(candidate.budget_0);
    let deposited_1 = required_1.min(candidate.budget_1);
    let (spare_in, spare_out) = if zero_for_one {
        (
            candidate.budget_0 - deposited_0,
            candidate.budget_1 - deposited_1,
        )
    } else {
        (
            candidate.budget_1 - deposited_1,
            candidate.budget_0 - deposited_0,
        )
    };

    let quote = LpSwapQuote {
        zero_for_one,
        amount_swap_in: candidate.quote.amount_in_used,
        amount_swap_out: candidate.quote.amount_out,
        liquidity_delta: candidate.liquidity,
        sqrt_price_after_x96: candidate.quote.sqrt_price_after_x96,
        sqrt_price_limit_x96: candidate.quote.sqrt_price_limit_x96,
        spare_in,
        spare_out,
    };
    log::debug!(
        "planned split: swap {} of {} (zero_for_one={}), mint {} liquidity, spares ({}, {})",
        quote.amount_swap_in,
        params.amount_in,
        zero_for_one,
        quote.liquidity_delta,
        quote.spare_in,
        quote.spare_out
    );
    Ok(quote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SwapError;
    use crate::math::tick_math::get_sqrt_ratio_at_tick;
    use crate::pool::PoolSnapshot;
    use crate::WAD;
    use alloy_primitives::address;
    use std::str::FromStr;

    const ONE_PERCENT: U256 = U256::from_limbs([10_000_000_000_000_000, 0, 0, 0]);

    fn token_0() -> Address {
        address!("0x0000000000000000000000000000000000000001")
    }

    fn token_1() -> Address {
        address!("0x0000000000000000000000000000000000000002")
    }

    fn seeded_pool(liquidity: u128) -> PoolSnapshot {
        let mut pool = PoolSnapshot::new(token_0(), token_1(), 3000, 60);
        pool.set_sqrt_price(get_sqrt_ratio_at_tick(0).unwrap())
            .unwrap();
        if liquidity > 0 {
            pool.add_position_liquidity(-887220, 887220, liquidity)
                .unwrap();
        }
        pool
    }

    fn base_params(amount_in: U256) -> LpSwapParams {
        LpSwapParams {
            token_in: token_0(),
            token_out: token_1(),
            amount_in,
            slippage_wad: ONE_PERCENT,
            tick_lower: -60,
            tick_upper: 60,
        }
    }

    #[test]
    fn rejects_zero_amount() {
        let pool = seeded_pool(1_000_000_000_000_000_000);
        let params = base_params(U256::ZERO);
        assert!(matches!(
            plan(&pool, &params),
            Err(Error::EngineError(EngineError::ZeroAmount))
        ));
    }

    #[test]
    fn rejects_inverted_range() {
        let pool = seeded_pool(1_000_000_000_000_000_000);
        let mut params = base_params(U256::from(1000u32));
        params.tick_lower = 60;
        params.tick_upper = -60;
        assert!(matches!(
            plan(&pool, &params),
            Err(Error::StateError(StateError::InvalidRange))
        ));
    }

    #[test]
    fn rejects_foreign_token_pair() {
        let pool = seeded_pool(1_000_000_000_000_000_000);
        let mut params = base_params(U256::from(1000u32));
        params.token_in = address!("0x00000000000000000000000000000000000000ff");
        assert!(matches!(
            plan(&pool, &params),
            Err(Error::EngineError(EngineError::TokenMismatch))
        ));

        // same token on both sides is also a mismatch
        let mut params = base_params(U256::from(1000u32));
        params.token_out = token_0();
        assert!(matches!(
            plan(&pool, &params),
            Err(Error::EngineError(EngineError::TokenMismatch))
        ));
    }

    #[test]
    fn rejects_degenerate_slippage() {
        let pool = seeded_pool(1_000_000_000_000_000_000);
        let mut params = base_params(U256::from_str("1000000000000000000").unwrap());
        params.slippage_wad = U256::ZERO;
        assert!(matches!(
            plan(&pool, &params),
            Err(Error::EngineError(EngineError::InvalidSlippage))
        ));
        params.slippage_wad = WAD;
        assert!(matches!(
            plan(&pool, &params),
            Err(Error::EngineError(EngineError::InvalidSlippage))
        ));
    }

    #[test]
    fn range_above_price_takes_token0_without_swapping() {
        let pool = seeded_pool(1_000_000_000_000_000_000);
        let amount = U256::from_str("1000000000000000000").unwrap();
        let mut params = base_params(amount);
        params.tick_lower = 60;
        params.tick_upper = 600;

        let quote = plan(&pool, &params).unwrap();
        assert!(quote.zero_for_one);
        assert_eq!(quote.amount_swap_in, U256::ZERO);
        assert_eq!(quote.amount_swap_out, U256::ZERO);
        assert_eq!(quote.spare_out, U256::ZERO);
        assert_eq!(
            quote.liquidity_delta,
            liquidity_for_amount_0(
                get_sqrt_ratio_at_tick(60).unwrap(),
                get_sqrt_ratio_at_tick(600).unwrap(),
                amount,
            )
            .unwrap()
        );
        // only rounding dust escapes the deposit
        assert!(quote.spare_in < U256::from(1000u32));
    }

    #[test]
    fn range_below_price_takes_token1_without_swapping() {
        let pool = seeded_pool(1_000_000_000_000_000_000);
        let amount = U256::from_str("1000000000000000000").unwrap();
        let mut params = base_params(amount);
        params.token_in = token_1();
        params.token_out = token_0();
        params.tick_lower = -600;
        params.tick_upper = -60;

        let quote = plan(&pool, &params).unwrap();
        assert!(!quote.zero_for_one);
        assert_eq!(quote.amount_swap_in, U256::ZERO);
        assert_eq!(
            quote.liquidity_delta,
            liquidity_for_amount_1(
                get_sqrt_ratio_at_tick(-600).unwrap(),
                get_sqrt_ratio_at_tick(-60).unwrap(),
                amount,
            )
            .unwrap()
        );
        assert!(quote.spare_in < U256::from(1000u32));
    }

    #[test]
    fn price_exactly_on_lower_bound_skips_the_swap() {
        let mut pool = seeded_pool(1_000_000_000_000_000_000);
        pool.set_sqrt_price(get_sqrt_ratio_at_tick(-60).unwrap())
            .unwrap();
        let amount = U256::from_str("1000000000000000000").unwrap();
        let params = base_params(amount);

        let quote = plan(&pool, &params).unwrap();
        assert_eq!(quote.amount_swap_in, U256::ZERO);
        assert_eq!(
            quote.liquidity_delta,
            liquidity_for_amount_0(
                get_sqrt_ratio_at_tick(-60).unwrap(),
                get_sqrt_ratio_at_tick(60).unwrap(),
                amount,
            )
            .unwrap()
        );
    }

    #[test]
    fn price_exactly_on_upper_bound_skips_the_swap() {
        let mut pool = seeded_pool(1_000_000_000_000_000_000);
        pool.set_sqrt_price(get_sqrt_ratio_at_tick(60).unwrap())
            .unwrap();
        let amount = U256::from_str("1000000000000000000").unwrap();
        let mut params = base_params(amount);
        params.token_in = token_1();
        params.token_out = token_0();

        let quote = plan(&pool, &params).unwrap();
        assert_eq!(quote.amount_swap_in, U256::ZERO);
        assert_eq!(
            quote.liquidity_delta,
            liquidity_for_amount_1(
                get_sqrt_ratio_at_tick(-60).unwrap(),
                get_sqrt_ratio_at_tick(60).unwrap(),
                amount,
            )
            .unwrap()
        );
    }

    #[test]
    fn symmetric_range_splits_near_half() {
        let pool = seeded_pool(10_000_000_000_000_000_000_000);
        let amount = U256::from_str("1000000000000000000").unwrap();
        let params = base_params(amount);

        let quote = plan(&pool, &params).unwrap();
        assert!(quote.liquidity_delta > 0);
        assert!(quote.amount_swap_in > U256::ZERO);
        assert!(quote.amount_swap_in < amount);

        // near tick 0 with a symmetric range, roughly half the budget swaps
        assert!(quote.amount_swap_in > amount * U256::from(40u8) / U256::from(100u8));
        assert!(quote.amount_swap_in < amount * U256::from(60u8) / U256::from(100u8));
    }

    #[test]
    fn plan_conserves_the_input_budget() {
        let pool = seeded_pool(10_000_000_000_000_000_000_000);
        let amount = U256::from_str("1000000000000000000").unwrap();
        let params = base_params(amount);

        let quote = plan(&pool, &params).unwrap();
        let (required_0, required_1) = amounts_for_liquidity(
            quote.sqrt_price_after_x96,
            get_sqrt_ratio_at_tick(params.tick_lower).unwrap(),
            get_sqrt_ratio_at_tick(params.tick_upper).unwrap(),
            quote.liquidity_delta,
            true,
        )
        .unwrap();

        let budget_0 = amount - quote.amount_swap_in;
        let deposited_0 = required_0.min(budget_0);
        let deposited_1 = required_1.min(quote.amount_swap_out);

        // every wei of input is swapped, deposited, or declared spare
        assert_eq!(
            quote.amount_swap_in + deposited_0 + quote.spare_in,
            amount
        );
        assert_eq!(deposited_1 + quote.spare_out, quote.amount_swap_out);

        // spares are rounding dust, not a chunk of the budget
        assert!(quote.spare_in < amount / U256::from(1000u32));
        assert!(quote.spare_out < quote.amount_swap_out / U256::from(1000u32));
    }

    #[test]
    fn plan_is_deterministic() {
        let pool = seeded_pool(10_000_000_000_000_000_000_000);
        let params = base_params(U256::from_str("1000000000000000000").unwrap());
        assert_eq!(plan(&pool, &params).unwrap(), plan(&pool, &params).unwrap());
    }

    #[test]
    fn plan_matches_exhaustive_scan() {
        let pool = seeded_pool(1_000_000_000_000_000_000);
        let amount = U256::from(10_000u32);
        let mut params = base_params(amount);
        params.tick_lower = -600;
        params.tick_upper = 600;
        let lower = get_sqrt_ratio_at_tick(-600).unwrap();
        let upper = get_sqrt_ratio_at_tick(600).unwrap();
        let limit = sqrt_price_limit_from_slippage(pool.sqrt_price_x96(), true, ONE_PERCENT)
            .unwrap();

        let mut scan_best = 0u128;
        let mut swap_amount = U256_1;
        while swap_amount <= amount {
            let candidate =
                evaluate(&pool, true, swap_amount, amount, limit, lower, upper).unwrap();
            scan_best = scan_best.max(candidate.liquidity);
            swap_amount += U256_1;
        }

        let quote = plan(&pool, &params).unwrap();
        // bisection may land one step off the integer peak
        assert!(
            quote.liquidity_delta + scan_best / 1000 + 10 >= scan_best,
            "planned {} vs scanned best {}",
            quote.liquidity_delta,
            scan_best
        );
    }

    #[test]
    fn thin_pool_degrades_into_spares_at_the_limit() {
        // the range spans far more than the 1% slippage window, so a thin
        // pool cannot source enough of the other token: the swap leg pins
        // at the limit and the surplus input is declared spare
        let pool = seeded_pool(1_000_000_000);
        let amount = U256::from_str("1000000000000000000000").unwrap();
        let mut params = base_params(amount);
        params.tick_lower = -6000;
        params.tick_upper = 6000;

        let quote = plan(&pool, &params).unwrap();
        assert_eq!(quote.sqrt_price_after_x96, quote.sqrt_price_limit_x96);
        assert!(quote.liquidity_delta > 0);
        // most of the budget could not be converted and stays spare
        assert!(quote.spare_in > amount / U256::from(2u8));
    }

    #[test]
    fn iteration_cap_falls_back_to_best_candidate() {
        let pool = seeded_pool(10_000_000_000_000_000_000_000);
        let amount = U256::from_str("1000000000000000000").unwrap();
        let params = base_params(amount);

        // a tiny cap cuts the search off early; the plan degrades to the
        // best candidate seen instead of failing
        let capped = plan_with_cap(&pool, &params, 3).unwrap();
        assert!(capped.liquidity_delta > 0);
        assert!(capped.amount_swap_in > U256::ZERO);
        assert!(capped.amount_swap_in < amount);

        let converged = plan(&pool, &params).unwrap();
        assert!(capped.liquidity_delta <= converged.liquidity_delta);
    }

    #[test]
    fn dust_input_yields_zero_liquidity_error() {
        let pool = seeded_pool(10_000_000_000_000_000_000_000);
        let params = base_params(U256_1);
        assert!(matches!(
            plan(&pool, &params),
            Err(Error::EngineError(EngineError::ZeroLiquidity))
        ));
    }

    #[test]
    fn empty_pool_fails_the_swap_leg() {
        let pool = seeded_pool(0);
        let params = base_params(U256::from_str("1000000000000000000").unwrap());
        assert!(matches!(
            plan(&pool, &params),
            Err(Error::SwapError(SwapError::LiquidityIsZero))
        ));
    }

    #[test]
    fn more_input_never_mints_less_liquidity() {
        let pool = seeded_pool(10_000_000_000_000_000_000_000);
        let mut last = 0u128;
        for exp in [14u32, 16, 18, 20] {
            let params = base_params(U256::from(10u8).pow(U256::from(exp)));
            let quote = plan(&pool, &params).unwrap();
            assert!(quote.liquidity_delta >= last, "liquidity shrank at 10^{exp}");
            last = quote.liquidity_delta;
        }
    }
}
