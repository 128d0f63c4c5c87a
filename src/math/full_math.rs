use crate::error::MathError;
use alloy_primitives::U256;

const U256_2: U256 = U256::from_limbs([2, 0, 0, 0]);
const U256_3: U256 = U256::from_limbs([3, 0, 0, 0]);

/// Computes `floor(a * b / denominator)` with a full 512-bit intermediate
/// product, so the result is exact whenever it fits in 256 bits.
///
/// This mirrors the Solidity `FullMath.mulDiv` algorithm: the 512-bit
/// product is reconstructed from `a * b mod 2^256` and `a * b mod 2^256-1`,
/// then divided by the odd part of the denominator and multiplied by its
/// modular inverse (six Newton-Raphson steps give full 256-bit precision).
pub fn mul_div(a: U256, b: U256, mut denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    // 512-bit product as prod1 * 2^256 + prod0
    let mm = a.mul_mod(b, U256::MAX);
    let mut prod0 = a.wrapping_mul(b);
    let (mut prod1, borrow) = mm.overflowing_sub(prod0);
    if borrow {
        prod1 = prod1.wrapping_sub(U256::ONE);
    }

    if prod1.is_zero() {
        return Ok(prod0.wrapping_div(denominator));
    }

    if denominator <= prod1 {
        return Err(MathError::Overflow);
    }

    // Subtract the remainder so [prod1 prod0] is an exact multiple of the
    // denominator.
    let remainder = a.mul_mod(b, denominator);
    let (sub, borrow) = prod0.overflowing_sub(remainder);
    prod0 = sub;
    if borrow {
        prod1 = prod1.wrapping_sub(U256::ONE);
    }

    // Factor out powers of two and fold the high word into the low word.
    let twos = denominator & denominator.wrapping_neg();
    denominator = denominator.wrapping_div(twos);
    prod0 = prod0.wrapping_div(twos);
    let twos_complement = twos
        .wrapping_neg()
        .wrapping_div(twos)
        .wrapping_add(U256::ONE);
    prod0 |= prod1.wrapping_mul(twos_complement);

    // Modular inverse of the (odd) denominator, seeded correct to 4 bits.
    let mut inverse = U256_3.wrapping_mul(denominator) ^ U256_2;
    for _ in 0..6 {
        inverse = inverse.wrapping_mul(U256_2.wrapping_sub(denominator.wrapping_mul(inverse)));
    }

    Ok(prod0.wrapping_mul(inverse))
}

/// Like [`mul_div`], but rounds toward positive infinity when the division
/// leaves a remainder.
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    let mut result = mul_div(a, b, denominator)?;

    if a.mul_mod(b, denominator) > U256::ZERO {
        if result == U256::MAX {
            return Err(MathError::Overflow);
        }
        result += U256::ONE;
    }
    Ok(result)
}

/// Divides `a` by `b`, rounding the quotient up when there is a remainder.
pub fn div_rounding_up(a: U256, b: U256) -> Result<U256, MathError> {
    if b.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let (quotient, remainder) = a.div_rem(b);
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + U256::ONE)
    }
}

/// Integer square root: the largest `r` with `r * r <= x`.
///
/// Babylonian iteration seeded with `x / 2`, which always overestimates the
/// root for `x > 1` so the sequence decreases monotonically to the answer.
pub fn sqrt(x: U256) -> U256 {
    if x <= U256::ONE {
        return x;
    }

    let mut estimate = x >> 1;
    let mut next = (estimate + x / estimate) >> 1;
    while next < estimate {
        estimate = next;
        next = (estimate + x / estimate) >> 1;
    }
    estimate
}
