// KelpSeed Math Package

#![no_std]

pub mod amounts;
pub mod constants;
pub mod deviation;
pub mod full_math;
pub mod liquidity;
pub mod sqrt_price;

// Re-export commonly used items from constants
pub use constants::*;

// Re-export full-precision arithmetic
pub use full_math::{
    div_rounding_up,
    i128_to_u128_safe,
    mul_div,
    mul_div_rounding_up,
    u128_to_i128_saturating,
};

// Re-export sqrt price functions
pub use sqrt_price::{
    get_sqrt_ratio_at_tick,
    get_tick_at_sqrt_ratio,
    max_sqrt_ratio,
    min_sqrt_ratio,
};

// Re-export liquidity functions
pub use liquidity::{
    get_amount0_for_liquidity,
    get_amount1_for_liquidity,
    get_amounts_for_liquidity,
    get_liquidity_for_amount0,
    get_liquidity_for_amount1,
    get_liquidity_for_amounts,
};

// Re-export seed planning and valuation
pub use amounts::{get_base_for_token0, plan_seed_amounts, spot_price_e18};

// Re-export the deviation scorer
pub use deviation::price_deviation_points;
