// SPDX-License-Identifier: MIT
// Tick <-> Sqrt Price Conversions (Q64.96)

use soroban_sdk::{Env, U256};

use crate::constants::{MAX_TICK, MIN_TICK};
use crate::full_math::u128_from_u256;

/// 2^128 as U256
fn q128(env: &Env) -> U256 {
    U256::from_u128(env, 1u128 << 64).mul(&U256::from_u128(env, 1u128 << 64))
}

/// 2^256 - 1 as U256
fn u256_max(env: &Env) -> U256 {
    U256::from_u128(env, u128::MAX)
        .mul(&q128(env))
        .add(&U256::from_u128(env, u128::MAX))
}

/// Multiply a Q128.128 value by a Q0.128 multiplier: (x * y) >> 128
fn mul_shift_128(env: &Env, x: &U256, y: u128) -> U256 {
    x.mul(&U256::from_u128(env, y)).div(&q128(env))
}

/// Convert tick to sqrt price in Q64.96 format
/// Formula: sqrt(1.0001^tick) * 2^96
///
/// Per-bit decomposition over precomputed Q0.128 multipliers for
/// sqrt(1.0001^-(2^n)), inverted for positive ticks, then narrowed to
/// Q64.96 with round-up on the 32 discarded fractional bits. Matches
/// the pool's own bonding-curve arithmetic bit-for-bit over the
/// supported tick domain.
pub fn get_sqrt_ratio_at_tick(env: &Env, tick: i32) -> u128 {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        panic!("tick out of range");
    }

    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from_u128(env, 0xfffcb933bd6fad37aa2d162d1a594001)
    } else {
        q128(env)
    };
    if abs_tick & 0x2 != 0 {
        ratio = mul_shift_128(env, &ratio, 0xfff97272373d413259a46990580e213a);
    }
    if abs_tick & 0x4 != 0 {
        ratio = mul_shift_128(env, &ratio, 0xfff2e50f5f656932ef12357cf3c7fdcc);
    }
    if abs_tick & 0x8 != 0 {
        ratio = mul_shift_128(env, &ratio, 0xffe5caca7e10e4e61c3624eaa0941cd0);
    }
    if abs_tick & 0x10 != 0 {
        ratio = mul_shift_128(env, &ratio, 0xffcb9843d60f6159c9db58835c926644);
    }
    if abs_tick & 0x20 != 0 {
        ratio = mul_shift_128(env, &ratio, 0xff973b41fa98c081472e6896dfb254c0);
    }
    if abs_tick & 0x40 != 0 {
        ratio = mul_shift_128(env, &ratio, 0xff2ea16466c96a3843ec78b326b52861);
    }
    if abs_tick & 0x80 != 0 {
        ratio = mul_shift_128(env, &ratio, 0xfe5dee046a99a2a811c461f1969c3053);
    }
    if abs_tick & 0x100 != 0 {
        ratio = mul_shift_128(env, &ratio, 0xfcbe86c7900a88aedcffc83b479aa3a4);
    }
    if abs_tick & 0x200 != 0 {
        ratio = mul_shift_128(env, &ratio, 0xf987a7253ac413176f2b074cf7815e54);
    }
    if abs_tick & 0x400 != 0 {
        ratio = mul_shift_128(env, &ratio, 0xf3392b0822b70005940c7a398e4b70f3);
    }
    if abs_tick & 0x800 != 0 {
        ratio = mul_shift_128(env, &ratio, 0xe7159475a2c29b7443b29c7fa6e889d9);
    }
    if abs_tick & 0x1000 != 0 {
        ratio = mul_shift_128(env, &ratio, 0xd097f3bdfd2022b8845ad8f792aa5825);
    }
    if abs_tick & 0x2000 != 0 {
        ratio = mul_shift_128(env, &ratio, 0xa9f746462d870fdf8a65dc1f90e061e5);
    }
    if abs_tick & 0x4000 != 0 {
        ratio = mul_shift_128(env, &ratio, 0x70d869a156d2a1b890bb3df62baf32f7);
    }
    if abs_tick & 0x8000 != 0 {
        ratio = mul_shift_128(env, &ratio, 0x31be135f97d08fd981231505542fcfa6);
    }
    if abs_tick & 0x10000 != 0 {
        ratio = mul_shift_128(env, &ratio, 0x9aa508b5b7a84e1c677de54f3e99bc9);
    }
    if abs_tick & 0x20000 != 0 {
        ratio = mul_shift_128(env, &ratio, 0x5d6af8dedb81196699c329225ee604);
    }
    if abs_tick & 0x40000 != 0 {
        ratio = mul_shift_128(env, &ratio, 0x2216e584f5fa1ea926041bedfe98);
    }

    // The multipliers above are for negative powers; invert for tick > 0
    if tick > 0 {
        ratio = u256_max(env).div(&ratio);
    }

    // Q128.128 -> Q64.96: drop 32 fractional bits, rounding up so the
    // narrowed ratio never undershoots the true value
    let divisor = U256::from_u128(env, 1u128 << 32);
    let truncated = ratio.div(&divisor);
    let sqrt_price = if ratio.rem_euclid(&divisor).gt(&U256::from_u32(env, 0)) {
        truncated.add(&U256::from_u32(env, 1))
    } else {
        truncated
    };

    u128_from_u256(&sqrt_price)
}

/// Lowest representable sqrt price, equivalent to
/// `get_sqrt_ratio_at_tick(MIN_TICK)`
pub fn min_sqrt_ratio(env: &Env) -> u128 {
    get_sqrt_ratio_at_tick(env, MIN_TICK)
}

/// Highest representable sqrt price, equivalent to
/// `get_sqrt_ratio_at_tick(MAX_TICK)`
pub fn max_sqrt_ratio(env: &Env) -> u128 {
    get_sqrt_ratio_at_tick(env, MAX_TICK)
}

/// Get the greatest tick whose sqrt ratio does not exceed the input
/// (floor semantics)
///
/// A sqrt price lying strictly between the representable values of two
/// neighboring ticks maps to the lower tick, so converting the returned
/// tick back to a sqrt price may produce a value below the input. That
/// asymmetry is inherent to the discretization.
pub fn get_tick_at_sqrt_ratio(env: &Env, sqrt_price_x96: u128) -> i32 {
    if sqrt_price_x96 < min_sqrt_ratio(env) || sqrt_price_x96 >= max_sqrt_ratio(env) {
        panic!("sqrt price out of bounds");
    }

    let mut low = MIN_TICK;
    let mut high = MAX_TICK;

    while low < high {
        let mid = low + (high - low + 1) / 2;
        if get_sqrt_ratio_at_tick(env, mid) <= sqrt_price_x96 {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    low
}
