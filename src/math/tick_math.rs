use crate::error::StateError;
use crate::math::bit_math::most_significant_bit;
use alloy_primitives::{I256, U256};

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = -MIN_TICK;

/// sqrt price at `MIN_TICK` (inclusive lower bound).
pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4295128739, 0, 0, 0]);
/// sqrt price just above `MAX_TICK` (exclusive upper bound).
pub const MAX_SQRT_RATIO: U256 =
    U256::from_limbs([6743328256752651558, 17280870778742802505, 4294805859, 0]);

// 255738958999603826347141 = 2^128 / log_2(sqrt(1.0001))
const LOG_SQRT_10001: I256 = I256::from_raw(U256::from_limbs([11745905768312294533, 13863, 0, 0]));
const TICK_LOW_BOUND: I256 = I256::from_raw(U256::from_limbs([
    6552757943157144234,
    184476617836266586,
    0,
    0,
]));
const TICK_HIGH_BOUND: I256 = I256::from_raw(U256::from_limbs([
    4998474450511881007,
    15793544031827761793,
    0,
    0,
]));

// Q128 multipliers for sqrt(1.0001)^(-2^k), k = 1..=19, as little-endian
// 64-bit limb pairs. The k = 0 multiplier is applied separately.
const TICK_MULTIPLIERS: [[u64; 2]; 19] = [
    [6459403834229662010, 18444899583751176498],
    [17226890335427755468, 18443055278223354162],
    [2032852871939366096, 18439367220385604838],
    [14545316742740207172, 18431993317065449817],
    [5129152022828963008, 18417254355718160513],
    [4894419605888772193, 18387811781193591352],
    [1280255884321894483, 18329067761203520168],
    [15924666964335305636, 18212142134806087854],
    [8010504389359918676, 17980523815641551639],
    [10668036004952895731, 17526086738831147013],
    [4878133418470705625, 16651378430235024244],
    [9537173718739605541, 15030750278693429944],
    [9972618978014552549, 12247334978882834399],
    [10428997489610666743, 8131365268884726200],
    [9305304367709015974, 3584323654723342297],
    [14301143598189091785, 696457651847595233],
    [7393154844743099908, 26294789957452057],
    [2209338891292245656, 37481735321082],
    [10518117631919034274, 76158723],
];

/// Returns the sqrt price (Q64.96) at a tick index, or `TickOutOfBounds`
/// if the tick lies outside the supported range.
///
/// The result matches the canonical concentrated-liquidity formula
/// bit-for-bit; downstream invariant checks compare prices for equality,
/// not tolerance, so this must never drift.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256, StateError> {
    let abs_tick = tick.unsigned_abs();

    if abs_tick > MAX_TICK as u32 {
        return Err(StateError::TickOutOfBounds);
    }

    // Q128 product of sqrt(1.0001)^(-2^k) over the set bits of |tick|.
    let mut ratio = if abs_tick & 1 != 0 {
        U256::from_limbs([12262481743371124737, 18445821805675392311, 0, 0])
    } else {
        U256::from_limbs([0, 0, 1, 0])
    };

    for (k, limbs) in TICK_MULTIPLIERS.iter().enumerate() {
        if abs_tick & (2 << k) != 0 {
            ratio = ratio.wrapping_mul(U256::from_limbs([limbs[0], limbs[1], 0, 0])) >> 128;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128 -> Q96, rounding up so the tick of the result is stable.
    let truncated = (ratio.as_limbs()[0] & 0xFFFF_FFFF) as u32;
    Ok((ratio >> 32) + U256::from((truncated != 0) as u64))
}

/// Returns the largest tick whose sqrt price is at most `sqrt_price_x96`,
/// the inverse of [`get_sqrt_ratio_at_tick`].
pub fn get_tick_at_sqrt_ratio(sqrt_price_x96: U256) -> Result<i32, StateError> {
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
        return Err(StateError::SqrtPriceOutOfBounds);
    }

    let ratio = sqrt_price_x96 << 32;
    let msb = most_significant_bit(ratio).map_err(|_| StateError::SqrtPriceOutOfBounds)?;

    // Normalize into [2^127, 2^128) for the fractional log2 expansion.
    let mut r = if msb >= 128 {
        ratio >> (msb - 127) as usize
    } else {
        ratio << (127 - msb) as usize
    };

    let mut log_2: I256 =
        (I256::from_raw(U256::from(msb)) - I256::from_raw(U256::from(128u8))) << 64;

    for shift in (50..=63usize).rev() {
        r = r.overflowing_mul(r).0 >> 127;
        let f = r >> 128usize;
        log_2 |= I256::from_raw(f << shift);
        r >>= f.as_limbs()[0] as usize;
    }

    let log_sqrt10001 = log_2.wrapping_mul(LOG_SQRT_10001);
    let tick_low = ((log_sqrt10001 - TICK_LOW_BOUND) >> 128usize)
        .into_raw()
        .as_limbs()[0] as i32;
    let tick_high = ((log_sqrt10001 + TICK_HIGH_BOUND) >> 128usize)
        .into_raw()
        .as_limbs()[0] as i32;

    Ok(if tick_low == tick_high {
        tick_low
    } else if get_sqrt_ratio_at_tick(tick_high)? <= sqrt_price_x96 {
        tick_high
    } else {
        tick_low
    })
}
