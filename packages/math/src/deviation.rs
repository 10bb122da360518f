// SPDX-License-Identifier: MIT
// Price Deviation Scoring

use soroban_sdk::Env;

use crate::constants::TOTAL_POINTS;
use crate::full_math::mul_div;

/// Normalized deviation between two prices in [0, TOTAL_POINTS]
///
/// Zero when the prices are equal, linear in |value - base| / base, and
/// saturating at TOTAL_POINTS once the ratio reaches 2x (or collapses
/// to 0x) in either direction. Overshoot and undershoot score the same.
pub fn price_deviation_points(env: &Env, base: u128, value: u128) -> u32 {
    if base == 0 {
        panic!("zero base price");
    }

    let diff = if value > base { value - base } else { base - value };
    let points = mul_div(env, diff, TOTAL_POINTS as u128, base);

    if points > TOTAL_POINTS as u128 {
        TOTAL_POINTS
    } else {
        points as u32
    }
}
