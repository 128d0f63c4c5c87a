use crate::error::{Error, MathError, StateError};
use crate::math::tick_bitmap::{flip_tick, BitmapWords};
use crate::math::tick_math::{
    get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, MAX_SQRT_RATIO, MIN_SQRT_RATIO,
};
use crate::FastMap;
use alloy_primitives::{Address, U160, U256};

/// Read-only view of concentrated-liquidity pool state. The quoter and the
/// split planner only ever read through this trait, so callers can back it
/// with an in-memory snapshot, a cache, or live chain data.
pub trait PoolStateReader {
    fn token0(&self) -> Address;
    fn token1(&self) -> Address;
    /// Fee in hundredths of a bip (e.g. 3000 = 0.3%).
    fn fee_pips(&self) -> u32;
    fn tick_spacing(&self) -> i32;
    fn sqrt_price_x96(&self) -> U256;
    fn tick(&self) -> i32;
    /// Liquidity currently in range.
    fn liquidity(&self) -> u128;
    /// One 256-bit word of the initialized-tick bitmap, zero if untouched.
    fn bitmap_word(&self, word_pos: i16) -> U256;
    /// Net liquidity delta at an initialized tick, `None` if the tick
    /// carries no liquidity.
    fn liquidity_net(&self, tick: i32) -> Option<i128>;
}

/// Per-tick liquidity bookkeeping.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInfo {
    pub liquidity_gross: u128,
    pub liquidity_net: i128,
}

#[inline(always)]
fn address_to_u160(address: Address) -> U160 {
    address.into()
}

/// Returns the token pair sorted by numeric address, the canonical
/// `(token0, token1)` ordering.
pub fn sort_tokens(token_a: Address, token_b: Address) -> (Address, Address) {
    if address_to_u160(token_a) < address_to_u160(token_b) {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    }
}

/// In-memory pool state: price, in-range liquidity, and sparse tick data.
///
/// Mutation helpers exist so simulations and tests can seed positions and
/// replay quoted swaps against the snapshot.
#[derive(Debug, Clone)]
pub struct PoolSnapshot {
    token0: Address,
    token1: Address,
    fee_pips: u32,
    tick_spacing: i32,
    sqrt_price_x96: U256,
    tick: i32,
    liquidity: u128,
    bitmap: FastMap<i16, U256>,
    ticks: FastMap<i32, TickInfo>,
}

impl PoolSnapshot {
    /// Creates an empty snapshot at an unset price. Seed it with
    /// [`set_sqrt_price`](Self::set_sqrt_price) and
    /// [`add_position_liquidity`](Self::add_position_liquidity) before use.
    pub fn new(token_a: Address, token_b: Address, fee_pips: u32, tick_spacing: i32) -> Self {
        let (token0, token1) = sort_tokens(token_a, token_b);
        Self {
            token0,
            token1,
            fee_pips,
            tick_spacing,
            sqrt_price_x96: U256::ZERO,
            tick: 0,
            liquidity: 0,
            bitmap: FastMap::default(),
            ticks: FastMap::default(),
        }
    }

    /// Sets the current sqrt price and derives the current tick from it.
    pub fn set_sqrt_price(&mut self, sqrt_price_x96: U256) -> Result<(), StateError> {
        if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
            return Err(StateError::SqrtPriceOutOfBounds);
        }
        self.tick = get_tick_at_sqrt_ratio(sqrt_price_x96)?;
        self.sqrt_price_x96 = sqrt_price_x96;
        Ok(())
    }

    /// Credits `liquidity` to the position `[tick_lower, tick_upper)`:
    /// updates per-tick nets, flips bitmap bits on first use, and bumps
    /// in-range liquidity if the current tick sits inside the range.
    pub fn add_position_liquidity(
        &mut self,
        tick_lower: i32,
        tick_upper: i32,
        liquidity: u128,
    ) -> Result<(), Error> {
        if tick_lower >= tick_upper {
            return Err(StateError::InvalidRange.into());
        }
        if tick_lower % self.tick_spacing != 0 || tick_upper % self.tick_spacing != 0 {
            return Err(MathError::OutOfBounds.into());
        }

        self.update_tick(tick_lower, liquidity as i128)?;
        self.update_tick(tick_upper, -(liquidity as i128))?;

        if self.tick >= tick_lower && self.tick < tick_upper {
            self.liquidity = self
                .liquidity
                .checked_add(liquidity)
                .ok_or(MathError::Overflow)?;
        }
        Ok(())
    }

    fn update_tick(&mut self, tick: i32, liquidity_net: i128) -> Result<(), Error> {
        let info = self.ticks.entry(tick).or_default();
        let was_initialized = info.liquidity_gross != 0;
        info.liquidity_gross = info
            .liquidity_gross
            .checked_add(liquidity_net.unsigned_abs())
            .ok_or(MathError::Overflow)?;
        info.liquidity_net += liquidity_net;

        if !was_initialized {
            flip_tick(&mut self.bitmap, tick, self.tick_spacing)?;
        }
        Ok(())
    }

    /// Moves the snapshot to a new sqrt price, as if a quoted swap had
    /// executed: updates the tick and recomputes in-range liquidity from
    /// the crossed tick nets.
    ///
    /// A downward move that lands exactly on an initialized boundary
    /// counts as having crossed it.
    pub fn move_price_to(
        &mut self,
        sqrt_price_x96: U256,
        zero_for_one: bool,
    ) -> Result<(), Error> {
        if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
            return Err(StateError::SqrtPriceOutOfBounds.into());
        }

        let mut tick = get_tick_at_sqrt_ratio(sqrt_price_x96)?;
        if zero_for_one && get_sqrt_ratio_at_tick(tick)? == sqrt_price_x96 {
            tick -= 1;
        }

        // in-range liquidity is the running sum of nets at or below the tick
        let mut net_sum: i128 = 0;
        for (&tick_idx, info) in self.ticks.iter() {
            if tick_idx <= tick {
                net_sum += info.liquidity_net;
            }
        }
        if net_sum < 0 {
            return Err(MathError::Underflow.into());
        }

        self.sqrt_price_x96 = sqrt_price_x96;
        self.tick = tick;
        self.liquidity = net_sum as u128;
        Ok(())
    }
}

impl PoolStateReader for PoolSnapshot {
    fn token0(&self) -> Address {
        self.token0
    }

    fn token1(&self) -> Address {
        self.token1
    }

    fn fee_pips(&self) -> u32 {
        self.fee_pips
    }

    fn tick_spacing(&self) -> i32 {
        self.tick_spacing
    }

    fn sqrt_price_x96(&self) -> U256 {
        self.sqrt_price_x96
    }

    fn tick(&self) -> i32 {
        self.tick
    }

    fn liquidity(&self) -> u128 {
        self.liquidity
    }

    fn bitmap_word(&self, word_pos: i16) -> U256 {
        self.bitmap.word(word_pos)
    }

    fn liquidity_net(&self, tick: i32) -> Option<i128> {
        self.ticks
            .get(&tick)
            .filter(|info| info.liquidity_gross != 0)
            .map(|info| info.liquidity_net)
    }
}
