//! Concentrated-liquidity swap-and-deposit engine in pure Rust.
//!
//! This crate turns a single token budget into a concentrated-liquidity
//! position: it quotes a slippage-bounded swap against a pool snapshot,
//! searches for the input split that maximizes the liquidity the resulting
//! token pair can mint over a tick range, and executes the plan with exact
//! invariant checks between simulation and execution.
//!
//! Layers, bottom up:
//! - Low-level math primitives (`math::*`) for ticks, sqrt prices, liquidity
//!   amounts, and initialized-tick bitmaps.
//! - A read-only [`pool::PoolStateReader`] trait plus an owned
//!   [`pool::PoolSnapshot`] for deterministic, chain-free simulation.
//! - The engine (`engine::*`): slippage-bounded quoter, optimal-split
//!   solver, and the swap-and-deposit executor.
//!
//! # Examples
//!
//! ## Quoting a slippage-bounded swap
//! ```no_run
//! use lp_swap_engine::{
//!     engine::quoter::quote_exact_input,
//!     math::tick_math::get_sqrt_ratio_at_tick,
//!     pool::PoolSnapshot,
//!     Address, U256, WAD,
//! };
//!
//! let token0 = Address::from([1u8; 20]);
//! let token1 = Address::from([2u8; 20]);
//! let mut pool = PoolSnapshot::new(token0, token1, 3000, 60);
//! pool.set_sqrt_price(get_sqrt_ratio_at_tick(0).unwrap()).unwrap();
//! pool.add_position_liquidity(-887220, 887220, 1_000_000_000_000_000_000u128).unwrap();
//!
//! // sell 1e18 of token0 with a 1% slippage bound
//! let quote = quote_exact_input(
//!     &pool,
//!     true,
//!     U256::from(1_000_000_000_000_000_000u128),
//!     WAD / U256::from(100u8),
//! )
//! .unwrap();
//! println!("in: {}, out: {}", quote.amount_in_used, quote.amount_out);
//! ```
//!
//! ## Planning an optimal swap-and-deposit split
//! ```no_run
//! use lp_swap_engine::{
//!     engine::solver::{plan, LpSwapParams},
//!     math::tick_math::get_sqrt_ratio_at_tick,
//!     pool::PoolSnapshot,
//!     Address, U256, WAD,
//! };
//!
//! let token0 = Address::from([1u8; 20]);
//! let token1 = Address::from([2u8; 20]);
//! let mut pool = PoolSnapshot::new(token0, token1, 3000, 60);
//! pool.set_sqrt_price(get_sqrt_ratio_at_tick(0).unwrap()).unwrap();
//! pool.add_position_liquidity(-887220, 887220, 10_000_000_000_000_000_000_000u128).unwrap();
//!
//! let quote = plan(
//!     &pool,
//!     &LpSwapParams {
//!         token_in: token0,
//!         token_out: token1,
//!         amount_in: U256::from(1_000_000_000_000_000_000u128),
//!         slippage_wad: WAD / U256::from(100u8),
//!         tick_lower: -60,
//!         tick_upper: 60,
//!     },
//! )
//! .unwrap();
//! println!(
//!     "swap {} for {}, mint {} liquidity",
//!     quote.amount_swap_in, quote.amount_swap_out, quote.liquidity_delta
//! );
//! ```

pub use alloy_primitives::{Address, I256, U256};

pub mod engine;
pub mod error;
mod hash;
pub mod math;
pub mod pool;

pub use hash::FastMap;

pub(crate) const U256_1: U256 = U256::from_limbs([1, 0, 0, 0]);

/// 2^160, the exclusive upper bound on sqrt prices.
pub(crate) const U160_MAX: U256 = U256::from_limbs([0, 0, 4294967296, 0]);

/// Number of fractional bits in the Q64.96 sqrt-price representation.
pub const RESOLUTION: u8 = 96;

/// 2^96, the Q64.96 fixed-point unit.
pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);

/// 10^18, the fixed-point unit used for percentages (1 WAD = 100%).
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);
