// Constants module:
// - Clear documentation for each constant
// - Grouped by functionality
// - Uses appropriate types for each constant

// ============================================================
// TICK CONSTANTS
// ============================================================

/// Minimum valid tick value (corresponds to minimum price)
/// Bounded so that the Q64.96 sqrt price always fits a u128 word
pub const MIN_TICK: i32 = -443636;

/// Maximum valid tick value (corresponds to maximum price)
pub const MAX_TICK: i32 = 443636;

// ============================================================
// SQRT PRICE CONSTANTS (Q64.96 format)
// ============================================================

/// Q96 multiplier (2^96) for fixed-point math
/// Scaling factor of the Q64.96 sqrt price format
pub const Q96: u128 = 1u128 << 96;

/// Sqrt price for a 1:1 price ratio (2^96)
/// This represents price = 1.0 in Q64.96 format
#[allow(dead_code)]
pub const SQRT_RATIO_1_1: u128 = Q96;

// ============================================================
// VALUATION CONSTANTS
// ============================================================

/// Scaling factor for exchange rates and spot prices (1e18)
/// Rates are expressed as base-asset units per 1e18 units of token0
pub const RATE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Budget units withheld before solving for liquidity, absorbing the
/// rounding dust of the wrap and amount conversions so the actual spend
/// never exceeds the held balance
pub const SEED_BUDGET_MARGIN: u128 = 4;

// ============================================================
// DEVIATION SCORER CONSTANTS
// ============================================================

/// Full scale of the price deviation score
/// A 2x ratio between two prices (in either direction) saturates here
pub const TOTAL_POINTS: u32 = 10_000;
