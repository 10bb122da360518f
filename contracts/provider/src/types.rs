// Provider Types

use soroban_sdk::{contracttype, Address};

// ============================================================
// CONFIGURATION
// ============================================================

/// Deployment-time configuration, immutable after `initialize`.
/// Only the admin slot (stored separately) can change afterwards.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProviderConfig {
    /// Governance principal: may act in place of the admin and is the
    /// beneficiary of the minted position and every refund
    pub agent: Address,
    /// Concentrated-liquidity pool being seeded
    pub pool: Address,
    /// Position-ownership registry in front of the pool
    pub position_manager: Address,
    /// Base asset held by the contract (token1 of the pool)
    pub base_token: Address,
    /// Rate-bearing wrapper asset (token0 of the pool)
    pub staked_token: Address,
    /// Reference exchange-rate feed for token0 priced in base units
    pub oracle: Address,
    /// Base-asset budget committed per seeding
    pub base_to_seed: i128,
    /// Lower tick of the position band
    pub position_lower_tick: i32,
    /// Upper tick of the position band
    pub position_upper_tick: i32,
    /// Guard rail: lowest corridor bound mint may be asked to accept
    pub min_allowed_tick: i32,
    /// Guard rail: highest corridor bound mint may be asked to accept
    pub max_allowed_tick: i32,
    /// Maximum tolerated deviation between the oracle reference price
    /// and the pool spot price, in deviation points
    pub max_oracle_deviation_points: u32,
}

// ============================================================
// LIFECYCLE
// ============================================================

/// Lifecycle of the single position this contract manages
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProviderStatus {
    /// No position minted yet; the contract may hold idle funds
    Empty,
    /// Position minted and owned by the agent
    Active,
    /// Liquidity withdrawn and forwarded out; terminal
    Closed,
}

/// Record of the minted position
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionRecord {
    pub token_id: u32,
    pub lower_tick: i32,
    pub upper_tick: i32,
    pub liquidity: i128,
}

/// Outcome of `close_position`: principal withdrawn plus the fee
/// breakdown collected before the withdrawal
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CloseResult {
    pub amount0: i128,
    pub amount1: i128,
    pub fees0: i128,
    pub fees1: i128,
}

// ============================================================
// EXTERNAL INTERFACE TYPES
// ============================================================

/// Pool state snapshot as returned by the pool's `get_state`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    /// Current sqrt price as Q64.96 fixed point
    pub sqrt_price_x96: u128,
    /// Current tick
    pub current_tick: i32,
    /// Active in-range liquidity
    pub liquidity: i128,
}
