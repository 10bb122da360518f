// SPDX-License-Identifier: MIT
// Liquidity Calculations

use soroban_sdk::Env;

use crate::constants::Q96;
use crate::full_math::{mul_div, mul_div_rounding_up};

#[inline]
fn sort_ratios(sqrt_ratio_a_x96: u128, sqrt_ratio_b_x96: u128) -> (u128, u128) {
    if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    }
}

/// Calculate liquidity from amount0
/// L = amount0 * (sqrt_pl * sqrt_pu / 2^96) / (sqrt_pu - sqrt_pl)
pub fn get_liquidity_for_amount0(
    env: &Env,
    sqrt_ratio_a_x96: u128,
    sqrt_ratio_b_x96: u128,
    amount0: u128,
) -> u128 {
    let (sqrt_lower, sqrt_upper) = sort_ratios(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if sqrt_lower >= sqrt_upper {
        return 0;
    }

    let intermediate = mul_div(env, sqrt_lower, sqrt_upper, Q96);
    mul_div(env, amount0, intermediate, sqrt_upper - sqrt_lower)
}

/// Calculate liquidity from amount1
/// L = amount1 * 2^96 / (sqrt_pu - sqrt_pl)
pub fn get_liquidity_for_amount1(
    env: &Env,
    sqrt_ratio_a_x96: u128,
    sqrt_ratio_b_x96: u128,
    amount1: u128,
) -> u128 {
    let (sqrt_lower, sqrt_upper) = sort_ratios(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if sqrt_lower >= sqrt_upper {
        return 0;
    }

    mul_div(env, amount1, Q96, sqrt_upper - sqrt_lower)
}

/// Calculate liquidity from both token amounts
///
/// Liquidity is limited by whichever token is scarcer at the current
/// price: below the range only token0 matters, above it only token1,
/// inside it the smaller of the two candidates wins.
pub fn get_liquidity_for_amounts(
    env: &Env,
    sqrt_ratio_x96: u128,
    sqrt_ratio_a_x96: u128,
    sqrt_ratio_b_x96: u128,
    amount0: u128,
    amount1: u128,
) -> u128 {
    let (sqrt_lower, sqrt_upper) = sort_ratios(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    if sqrt_ratio_x96 <= sqrt_lower {
        get_liquidity_for_amount0(env, sqrt_lower, sqrt_upper, amount0)
    } else if sqrt_ratio_x96 < sqrt_upper {
        let liquidity0 = get_liquidity_for_amount0(env, sqrt_ratio_x96, sqrt_upper, amount0);
        let liquidity1 = get_liquidity_for_amount1(env, sqrt_lower, sqrt_ratio_x96, amount1);
        liquidity0.min(liquidity1)
    } else {
        get_liquidity_for_amount1(env, sqrt_lower, sqrt_upper, amount1)
    }
}

/// Calculate token0 amount for a liquidity and price range
/// amount0 = L * 2^96 * (sqrt_pu - sqrt_pl) / (sqrt_pu * sqrt_pl)
pub fn get_amount0_for_liquidity(
    env: &Env,
    sqrt_ratio_a_x96: u128,
    sqrt_ratio_b_x96: u128,
    liquidity: u128,
    round_up: bool,
) -> u128 {
    let (sqrt_lower, sqrt_upper) = sort_ratios(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if sqrt_lower >= sqrt_upper || liquidity == 0 {
        return 0;
    }

    let delta = sqrt_upper - sqrt_lower;
    if round_up {
        let fraction = mul_div_rounding_up(env, delta, Q96, sqrt_upper);
        mul_div_rounding_up(env, liquidity, fraction, sqrt_lower)
    } else {
        let fraction = mul_div(env, delta, Q96, sqrt_upper);
        mul_div(env, liquidity, fraction, sqrt_lower)
    }
}

/// Calculate token1 amount for a liquidity and price range
/// amount1 = L * (sqrt_pu - sqrt_pl) / 2^96
pub fn get_amount1_for_liquidity(
    env: &Env,
    sqrt_ratio_a_x96: u128,
    sqrt_ratio_b_x96: u128,
    liquidity: u128,
    round_up: bool,
) -> u128 {
    let (sqrt_lower, sqrt_upper) = sort_ratios(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if sqrt_lower >= sqrt_upper || liquidity == 0 {
        return 0;
    }

    if round_up {
        mul_div_rounding_up(env, liquidity, sqrt_upper - sqrt_lower, Q96)
    } else {
        mul_div(env, liquidity, sqrt_upper - sqrt_lower, Q96)
    }
}

/// Calculate token amounts from liquidity at the given current price
pub fn get_amounts_for_liquidity(
    env: &Env,
    sqrt_ratio_x96: u128,
    sqrt_ratio_a_x96: u128,
    sqrt_ratio_b_x96: u128,
    liquidity: u128,
) -> (u128, u128) {
    let (sqrt_lower, sqrt_upper) = sort_ratios(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    let sp = sqrt_ratio_x96.max(sqrt_lower).min(sqrt_upper);

    let amount0 = if sp < sqrt_upper {
        get_amount0_for_liquidity(env, sp, sqrt_upper, liquidity, false)
    } else {
        0
    };

    let amount1 = if sp > sqrt_lower {
        get_amount1_for_liquidity(env, sqrt_lower, sp, liquidity, false)
    } else {
        0
    };

    (amount0, amount1)
}
