// SPDX-License-Identifier: MIT
// Seed Amount Planning
//
// Splits a fixed base-asset budget into the pair of token amounts a
// position mint would require at the current pool price. Token0 is
// valued through an external exchange rate (1e18-scaled base units per
// token0 unit), token1 is valued 1:1 with the base asset. Within a
// fixed tick range both amounts are linear in liquidity, so the budget
// equation is solved with a single division instead of a search.

use soroban_sdk::Env;

use crate::constants::{Q96, RATE_SCALE, SEED_BUDGET_MARGIN};
use crate::full_math::{mul_div, mul_div_rounding_up};

/// Plan the token amounts for seeding `budget_base` into the range
/// [sqrt_lower_x96, sqrt_upper_x96] at the current price.
///
/// Returns (amount0, amount1, liquidity). The amounts cost at most
/// `budget_base - SEED_BUDGET_MARGIN` plus rounding dust, so the spend
/// can never exceed the budget itself.
pub fn plan_seed_amounts(
    env: &Env,
    sqrt_price_x96: u128,
    sqrt_lower_x96: u128,
    sqrt_upper_x96: u128,
    base_per_token0: u128,
    budget_base: u128,
) -> (u128, u128, u128) {
    if sqrt_lower_x96 >= sqrt_upper_x96 {
        panic!("empty tick range");
    }
    if base_per_token0 == 0 {
        panic!("zero base price");
    }
    if budget_base <= SEED_BUDGET_MARGIN {
        return (0, 0, 0);
    }
    let budget = budget_base - SEED_BUDGET_MARGIN;

    let sp = sqrt_price_x96.max(sqrt_lower_x96).min(sqrt_upper_x96);

    // Per-liquidity-unit amounts, X96-scaled:
    //   unit0 = 2^192 * (sqrt_pu - sp) / (sp * sqrt_pu)
    //   unit1 = sp - sqrt_pl
    let unit0_x96 = if sp < sqrt_upper_x96 {
        mul_div(
            env,
            mul_div(env, Q96, Q96, sp),
            sqrt_upper_x96 - sp,
            sqrt_upper_x96,
        )
    } else {
        0
    };
    let unit1_x96 = sp - sqrt_lower_x96;

    // Base-asset cost of one liquidity unit, X96-scaled
    let cost_x96 = mul_div(env, base_per_token0, unit0_x96, RATE_SCALE) + unit1_x96;
    if cost_x96 == 0 {
        panic!("degenerate seed cost");
    }

    let liquidity = mul_div(env, budget, Q96, cost_x96);
    let amount0 = mul_div(env, liquidity, unit0_x96, Q96);
    let amount1 = mul_div(env, liquidity, unit1_x96, Q96);

    (amount0, amount1, liquidity)
}

/// Base-asset cost of acquiring exactly `amount0` units of token0 at
/// the given rate, rounded up plus one unit so the wrapping call always
/// yields at least `amount0` back.
pub fn get_base_for_token0(env: &Env, amount0: u128, base_per_token0: u128) -> u128 {
    if amount0 == 0 {
        return 0;
    }
    mul_div_rounding_up(env, amount0, base_per_token0, RATE_SCALE) + 1
}

/// Pool spot price (token1 per token0) scaled to 1e18
/// price = (sqrt_price / 2^96)^2 * 1e18
pub fn spot_price_e18(env: &Env, sqrt_price_x96: u128) -> u128 {
    mul_div(
        env,
        mul_div(env, sqrt_price_x96, sqrt_price_x96, Q96),
        RATE_SCALE,
        Q96,
    )
}
