// SPDX-License-Identifier: MIT
// Full-Precision Multiply-Divide Operations

use soroban_sdk::{Env, U256};

/// Type conversion helpers
#[inline]
pub fn i128_to_u128_safe(x: i128) -> u128 {
    if x <= 0 { 0 } else { x as u128 }
}

#[inline]
pub fn u128_to_i128_saturating(x: u128) -> i128 {
    if x > i128::MAX as u128 { i128::MAX } else { x as i128 }
}

/// Multiply and divide with 256-bit intermediate precision (rounds down)
/// Calculates: (a * b) / denominator
pub fn mul_div(env: &Env, a: u128, b: u128, denominator: u128) -> u128 {
    if denominator == 0 {
        panic!("mul_div: divide by zero");
    }

    let a_256 = U256::from_u128(env, a);
    let b_256 = U256::from_u128(env, b);
    let den_256 = U256::from_u128(env, denominator);

    let product = a_256.mul(&b_256);
    let result = product.div(&den_256);

    u128_from_u256(&result)
}

/// Multiply and divide with 256-bit intermediate precision (rounds up)
/// Calculates: ceil((a * b) / denominator)
pub fn mul_div_rounding_up(env: &Env, a: u128, b: u128, denominator: u128) -> u128 {
    if denominator == 0 {
        panic!("mul_div: divide by zero");
    }

    let a_256 = U256::from_u128(env, a);
    let b_256 = U256::from_u128(env, b);
    let den_256 = U256::from_u128(env, denominator);

    let product = a_256.mul(&b_256);
    let result = product.div(&den_256);
    let remainder = product.rem_euclid(&den_256);

    let floored = u128_from_u256(&result);
    if remainder.gt(&U256::from_u32(env, 0)) {
        if floored == u128::MAX {
            panic!("mul_div: overflow");
        }
        floored + 1
    } else {
        floored
    }
}

/// Unsigned division with rounding up
pub fn div_rounding_up(a: u128, b: u128) -> u128 {
    if b == 0 {
        panic!("div: divide by zero");
    }
    if a == 0 {
        return 0;
    }
    (a - 1) / b + 1
}

/// Convert U256 to u128, panics if the value does not fit
pub fn u128_from_u256(value: &U256) -> u128 {
    match value.to_u128() {
        Some(v) => v,
        None => panic!("u256: overflow into u128"),
    }
}
