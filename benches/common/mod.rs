#![allow(dead_code)]

use criterion::{black_box, Criterion};
use lp_swap_engine::engine::quoter::{quote_exact_input, sqrt_price_limit_from_slippage};
use lp_swap_engine::engine::solver::{plan, LpSwapParams};
use lp_swap_engine::math::full_math::{mul_div, sqrt};
use lp_swap_engine::math::swap_math::compute_swap_step;
use lp_swap_engine::math::tick_bitmap::{flip_tick, next_initialized_tick_within_one_word};
use lp_swap_engine::math::tick_math::{get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio};
use lp_swap_engine::math::sqrt_price_math::get_next_sqrt_price_from_input;
use lp_swap_engine::pool::{PoolSnapshot, PoolStateReader};
use lp_swap_engine::{Address, FastMap, I256, U256, Q96, WAD};

fn one_percent() -> U256 {
    WAD / U256::from(100u8)
}

fn seeded_pool(liquidity: u128) -> PoolSnapshot {
    let token0 = Address::from([1u8; 20]);
    let token1 = Address::from([2u8; 20]);
    let mut pool = PoolSnapshot::new(token0, token1, 3000, 60);
    pool.set_sqrt_price(get_sqrt_ratio_at_tick(0).unwrap())
        .unwrap();
    pool.add_position_liquidity(-887220, 887220, liquidity)
        .unwrap();
    pool.add_position_liquidity(-600, 600, liquidity / 2).unwrap();
    pool.add_position_liquidity(-60, 60, liquidity / 4).unwrap();
    pool
}

pub fn bench_tick_math(c: &mut Criterion) {
    c.bench_function("get_sqrt_ratio_at_tick", |b| {
        b.iter(|| {
            for tick in [-887272, -100_000, -60, 0, 60, 100_000, 887271] {
                black_box(get_sqrt_ratio_at_tick(black_box(tick)).unwrap());
            }
        })
    });

    let prices: Vec<U256> = [-500_000, -60, 0, 60, 500_000]
        .iter()
        .map(|t| get_sqrt_ratio_at_tick(*t).unwrap())
        .collect();
    c.bench_function("get_tick_at_sqrt_ratio", |b| {
        b.iter(|| {
            for price in &prices {
                black_box(get_tick_at_sqrt_ratio(black_box(*price)).unwrap());
            }
        })
    });
}

pub fn bench_full_math(c: &mut Criterion) {
    let a = U256::from(123_456_789_000_000_000_000u128);
    c.bench_function("mul_div", |b| {
        b.iter(|| black_box(mul_div(black_box(a), black_box(Q96), black_box(WAD)).unwrap()))
    });
    c.bench_function("sqrt", |b| {
        b.iter(|| black_box(sqrt(black_box(a * WAD))))
    });
}

pub fn bench_sqrt_price_math(c: &mut Criterion) {
    let price = get_sqrt_ratio_at_tick(0).unwrap();
    let amount = U256::from(1_000_000_000_000_000_000u128);
    c.bench_function("get_next_sqrt_price_from_input", |b| {
        b.iter(|| {
            black_box(
                get_next_sqrt_price_from_input(
                    black_box(price),
                    black_box(10_000_000_000_000_000_000_000u128),
                    black_box(amount),
                    black_box(true),
                )
                .unwrap(),
            )
        })
    });
}

pub fn bench_swap_math(c: &mut Criterion) {
    let price = get_sqrt_ratio_at_tick(0).unwrap();
    let target = get_sqrt_ratio_at_tick(-100).unwrap();
    let amount = I256::from_raw(U256::from(1_000_000_000_000_000_000u128));
    c.bench_function("compute_swap_step", |b| {
        b.iter(|| {
            black_box(
                compute_swap_step(
                    black_box(price),
                    black_box(target),
                    black_box(2_000_000_000_000_000_000u128),
                    black_box(amount),
                    black_box(3000),
                )
                .unwrap(),
            )
        })
    });
}

pub fn bench_tick_bitmap(c: &mut Criterion) {
    let mut bitmap: FastMap<i16, U256> = FastMap::default();
    for tick in (-887220..=887220).step_by(60 * 500) {
        flip_tick(&mut bitmap, tick, 60).unwrap();
    }
    c.bench_function("next_initialized_tick_within_one_word", |b| {
        b.iter(|| {
            black_box(
                next_initialized_tick_within_one_word(
                    black_box(&bitmap),
                    black_box(0),
                    black_box(60),
                    black_box(true),
                )
                .unwrap(),
            )
        })
    });
}

pub fn bench_quoter(c: &mut Criterion) {
    let pool = seeded_pool(10_000_000_000_000_000_000_000);
    let amount = U256::from(1_000_000_000_000_000_000u128);
    c.bench_function("quote_exact_input", |b| {
        b.iter(|| {
            black_box(
                quote_exact_input(
                    black_box(&pool),
                    black_box(true),
                    black_box(amount),
                    black_box(one_percent()),
                )
                .unwrap(),
            )
        })
    });

    let price = pool.sqrt_price_x96();
    c.bench_function("sqrt_price_limit_from_slippage", |b| {
        b.iter(|| {
            black_box(
                sqrt_price_limit_from_slippage(
                    black_box(price),
                    black_box(true),
                    black_box(one_percent()),
                )
                .unwrap(),
            )
        })
    });
}

pub fn bench_solver(c: &mut Criterion) {
    let pool = seeded_pool(10_000_000_000_000_000_000_000);
    let params = LpSwapParams {
        token_in: pool.token0(),
        token_out: pool.token1(),
        amount_in: U256::from(1_000_000_000_000_000_000u128),
        slippage_wad: one_percent(),
        tick_lower: -600,
        tick_upper: 600,
    };
    c.bench_function("plan_optimal_split", |b| {
        b.iter(|| black_box(plan(black_box(&pool), black_box(&params)).unwrap()))
    });
}
