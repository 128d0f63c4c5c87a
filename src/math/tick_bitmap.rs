use crate::error::MathError;
use crate::math::bit_math::{least_significant_bit, most_significant_bit};
use crate::{FastMap, U256_1};
use alloy_primitives::U256;

/// Source of 256-bit bitmap words keyed by word index. Implemented for the
/// sparse in-memory map and for adapters over external pool state.
pub trait BitmapWords {
    /// Returns the word at `word_pos`, or zero if no tick in it was ever
    /// initialized.
    fn word(&self, word_pos: i16) -> U256;
}

impl BitmapWords for FastMap<i16, U256> {
    fn word(&self, word_pos: i16) -> U256 {
        *self.get(&word_pos).unwrap_or(&U256::ZERO)
    }
}

/// Maps a compressed tick index into `(word, bit)` bitmap coordinates.
pub fn position(tick: i32) -> (i16, u8) {
    ((tick >> 8) as i16, (tick & 0xff) as u8)
}

/// Toggles the initialized flag of `tick` in the sparse bitmap.
///
/// `tick` must be aligned to `tick_spacing`; misaligned ticks can never be
/// initialized and are rejected with `OutOfBounds`.
pub fn flip_tick(
    tick_bitmap: &mut FastMap<i16, U256>,
    tick: i32,
    tick_spacing: i32,
) -> Result<(), MathError> {
    if tick % tick_spacing != 0 {
        return Err(MathError::OutOfBounds);
    }

    let (word_pos, bit_pos) = position(tick / tick_spacing);
    let mask = U256_1 << bit_pos;
    let word = tick_bitmap.word(word_pos);
    tick_bitmap.insert(word_pos, word ^ mask);
    Ok(())
}

/// Finds the next initialized tick within the same 256-tick word as `tick`,
/// searching left (`lte`) or right (`!lte`).
///
/// Returns the candidate tick and whether it is actually initialized; an
/// uninitialized result marks the word boundary and tells the caller to
/// continue the search from there.
pub fn next_initialized_tick_within_one_word(
    bitmap: &impl BitmapWords,
    tick: i32,
    tick_spacing: i32,
    lte: bool,
) -> Result<(i32, bool), MathError> {
    let mut compressed = tick / tick_spacing;
    // round toward negative infinity
    if tick < 0 && tick % tick_spacing != 0 {
        compressed -= 1;
    }

    if lte {
        let (word_pos, bit_pos) = position(compressed);

        // all bits at or below bit_pos
        let mask = (U256_1 << bit_pos) - U256_1 + (U256_1 << bit_pos);
        let masked = bitmap.word(word_pos) & mask;
        let initialized = !masked.is_zero();

        let next = if initialized {
            (compressed - (bit_pos - most_significant_bit(masked)?) as i32) * tick_spacing
        } else {
            (compressed - bit_pos as i32) * tick_spacing
        };
        Ok((next, initialized))
    } else {
        let (word_pos, bit_pos) = position(compressed + 1);

        // all bits at or above bit_pos
        let mask = !((U256_1 << bit_pos) - U256_1);
        let masked = bitmap.word(word_pos) & mask;
        let initialized = !masked.is_zero();

        let next = if initialized {
            (compressed + 1 + (least_significant_bit(masked)? - bit_pos) as i32) * tick_spacing
        } else {
            (compressed + 1 + (255 - bit_pos) as i32) * tick_spacing
        };
        Ok((next, initialized))
    }
}
