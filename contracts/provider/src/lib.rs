#![no_std]

//! # KelpSeed Provider
//!
//! Single-purpose liquidity provisioning contract. It holds a fixed
//! base-asset budget, converts it into the token pair a concentrated
//! position requires at the pool's current price, mints that position
//! through the position manager, and hands ownership to the governance
//! agent. The position can later be retracted with fee collection once
//! the agent returns the position token.
//!
//! ## Responsibilities:
//! 1. Seed exactly one position from a fixed budget (mint)
//! 2. Guard the mint against moved or manipulated prices
//! 3. Retract the position and forward proceeds (close)
//! 4. Recover stray assets to the agent (refunds)

use soroban_sdk::{contract, contractimpl, token, Address, Env, IntoVal, Symbol};

use kelpseed_math::{
    get_base_for_token0, get_sqrt_ratio_at_tick, i128_to_u128_safe, plan_seed_amounts,
    price_deviation_points, spot_price_e18, u128_to_i128_saturating, MAX_TICK, MIN_TICK,
    TOTAL_POINTS,
};

mod error;
mod events;
mod storage;
pub mod types;

pub use error::ProviderError;
use events::*;
use storage::*;
use types::*;

#[contract]
pub struct KelpSeedProvider;

#[contractimpl]
impl KelpSeedProvider {
    // ========================================================
    // INITIALIZATION
    // ========================================================

    /// Initialize the provider with its immutable configuration
    ///
    /// # Arguments
    /// * `admin` - Initial admin (transferable later via `set_admin`)
    /// * `config` - Deployment configuration, fixed for the lifetime of
    ///   the contract
    pub fn initialize(env: Env, admin: Address, config: ProviderConfig) -> Result<(), ProviderError> {
        admin.require_auth();

        if is_initialized(&env) {
            return Err(ProviderError::AlreadyInitialized);
        }

        if config.position_lower_tick >= config.position_upper_tick
            || config.min_allowed_tick >= config.max_allowed_tick
            || config.position_lower_tick < MIN_TICK
            || config.position_upper_tick > MAX_TICK
            || config.min_allowed_tick < MIN_TICK
            || config.max_allowed_tick > MAX_TICK
        {
            return Err(ProviderError::InvalidTickRange);
        }

        if config.base_to_seed <= 0 {
            return Err(ProviderError::InvalidSeedAmount);
        }

        if config.max_oracle_deviation_points > TOTAL_POINTS {
            return Err(ProviderError::InvalidDeviationLimit);
        }

        write_config(&env, &config);
        write_admin(&env, &admin);
        write_status(&env, &ProviderStatus::Empty);
        set_initialized(&env);

        emit_initialized(&env, &admin, &config.agent);

        Ok(())
    }

    // ========================================================
    // FUNDING
    // ========================================================

    /// Deposit base assets into the provider
    ///
    /// Deliberately un-gated: anyone may fund the contract.
    pub fn deposit(env: Env, from: Address, amount: i128) -> Result<(), ProviderError> {
        let config = load_config(&env)?;
        from.require_auth();

        if amount <= 0 {
            return Err(ProviderError::InvalidAmount);
        }

        token::Client::new(&env, &config.base_token).transfer(
            &from,
            &env.current_contract_address(),
            &amount,
        );

        emit_base_received(&env, &from, amount);

        Ok(())
    }

    // ========================================================
    // SEEDING
    // ========================================================

    /// Mint the position from the configured budget
    ///
    /// `min_tick` / `max_tick` define the corridor the live pool tick
    /// must lie in at call time; both must stay within the configured
    /// guard rails. The position itself is always minted at the
    /// configured position band.
    ///
    /// # Returns
    /// (token_id, liquidity, amount0, amount1)
    pub fn mint(
        env: Env,
        caller: Address,
        min_tick: i32,
        max_tick: i32,
    ) -> Result<(u32, i128, i128, i128), ProviderError> {
        let config = load_config(&env)?;
        require_admin_or_agent(&env, &caller, &config)?;

        match read_status(&env) {
            ProviderStatus::Empty => {}
            ProviderStatus::Active => return Err(ProviderError::PositionAlreadyActive),
            ProviderStatus::Closed => return Err(ProviderError::ProviderClosed),
        }

        if min_tick >= max_tick
            || min_tick < config.min_allowed_tick
            || max_tick > config.max_allowed_tick
        {
            return Err(ProviderError::DesiredTickOutOfAllowedRange);
        }

        let this = env.current_contract_address();
        let base = token::Client::new(&env, &config.base_token);
        if base.balance(&this) < config.base_to_seed {
            return Err(ProviderError::BalanceLessThanSeed);
        }

        // All market state is read once, here, and used consistently
        // through the rest of the call
        let state = pool_state(&env, &config.pool);
        if state.current_tick < min_tick || state.current_tick > max_tick {
            return Err(ProviderError::TickDeviationTooBig);
        }

        let reference = oracle_latest_price(&env, &config.oracle);
        if reference <= 0 {
            return Err(ProviderError::ZeroBasePrice);
        }
        let spot = spot_price_e18(&env, state.sqrt_price_x96);
        let deviation = price_deviation_points(&env, reference as u128, spot);
        if deviation > config.max_oracle_deviation_points {
            return Err(ProviderError::PriceDeviationTooBig);
        }

        let rate = wrapper_base_per_token(&env, &config.staked_token);
        if rate <= 0 {
            return Err(ProviderError::ZeroBasePrice);
        }

        let sqrt_lower = get_sqrt_ratio_at_tick(&env, config.position_lower_tick);
        let sqrt_upper = get_sqrt_ratio_at_tick(&env, config.position_upper_tick);
        let (amount0, amount1, _) = plan_seed_amounts(
            &env,
            state.sqrt_price_x96,
            sqrt_lower,
            sqrt_upper,
            rate as u128,
            i128_to_u128_safe(config.base_to_seed),
        );
        let amount0 = u128_to_i128_saturating(amount0);
        let amount1 = u128_to_i128_saturating(amount1);

        // Acquire token0 through the wrapper, then fund the pool up
        // front; the position mint below verifies the balances it needs
        let staked = token::Client::new(&env, &config.staked_token);
        if amount0 > 0 {
            let base_cost = u128_to_i128_saturating(get_base_for_token0(
                &env,
                i128_to_u128_safe(amount0),
                rate as u128,
            ));
            base.transfer(&this, &config.staked_token, &base_cost);
            wrapper_wrap(&env, &config.staked_token, &this, base_cost);
            staked.transfer(&this, &config.pool, &amount0);
        }
        if amount1 > 0 {
            base.transfer(&this, &config.pool, &amount1);
        }

        let (token_id, liquidity, minted0, minted1) = position_manager_mint(
            &env,
            &config.position_manager,
            &this,
            config.position_lower_tick,
            config.position_upper_tick,
            amount0,
            amount1,
        );

        // Hand the position token to the agent
        position_manager_transfer(&env, &config.position_manager, &this, &config.agent, token_id);

        // Refund every leftover token unit
        let staked_dust = staked.balance(&this);
        if staked_dust > 0 {
            staked.transfer(&this, &config.agent, &staked_dust);
        }
        let base_dust = base.balance(&this);
        if base_dust > 0 {
            base.transfer(&this, &config.agent, &base_dust);
        }

        write_position(
            &env,
            &PositionRecord {
                token_id,
                lower_tick: config.position_lower_tick,
                upper_tick: config.position_upper_tick,
                liquidity,
            },
        );
        write_status(&env, &ProviderStatus::Active);

        emit_seeded(&env, &caller, token_id, liquidity, minted0, minted1);

        Ok((token_id, liquidity, minted0, minted1))
    }

    // ========================================================
    // RETRACTION
    // ========================================================

    /// Close the position: collect fees, withdraw all liquidity and
    /// forward the proceeds to the agent
    ///
    /// The agent must have transferred the position token back to this
    /// contract beforehand.
    pub fn close_position(env: Env, caller: Address) -> Result<CloseResult, ProviderError> {
        let config = load_config(&env)?;
        require_admin_or_agent(&env, &caller, &config)?;

        if read_status(&env) != ProviderStatus::Active {
            return Err(ProviderError::NoActivePosition);
        }
        let position = read_position(&env).ok_or(ProviderError::NoActivePosition)?;

        let this = env.current_contract_address();
        let owner = position_manager_owner_of(&env, &config.position_manager, position.token_id);
        if owner != this {
            return Err(ProviderError::PositionTokenNotReturned);
        }

        // Collect fees first, while the principal is still locked
        let (fees0, fees1) =
            position_manager_collect(&env, &config.position_manager, position.token_id, &this);
        let (amount0, amount1) = position_manager_decrease(
            &env,
            &config.position_manager,
            position.token_id,
            position.liquidity,
        );
        position_manager_collect(&env, &config.position_manager, position.token_id, &this);
        position_manager_burn(&env, &config.position_manager, position.token_id);

        // Forward principal and fees
        let staked = token::Client::new(&env, &config.staked_token);
        let base = token::Client::new(&env, &config.base_token);
        let staked_balance = staked.balance(&this);
        if staked_balance > 0 {
            staked.transfer(&this, &config.agent, &staked_balance);
        }
        let base_balance = base.balance(&this);
        if base_balance > 0 {
            base.transfer(&this, &config.agent, &base_balance);
        }

        remove_position(&env);
        write_status(&env, &ProviderStatus::Closed);

        emit_retracted(&env, &caller, amount0, amount1, fees0, fees1);

        Ok(CloseResult {
            amount0,
            amount1,
            fees0,
            fees1,
        })
    }

    // ========================================================
    // ASSET RECOVERY
    // ========================================================

    /// Refund the whole held base balance to the agent
    pub fn refund_base(env: Env, caller: Address) -> Result<i128, ProviderError> {
        let config = load_config(&env)?;
        require_admin_or_agent(&env, &caller, &config)?;

        let this = env.current_contract_address();
        let base = token::Client::new(&env, &config.base_token);
        let amount = base.balance(&this);
        if amount > 0 {
            base.transfer(&this, &config.agent, &amount);
        }

        emit_base_refunded(&env, &caller, amount);

        Ok(amount)
    }

    /// Refund an arbitrary token amount to the agent
    pub fn refund_token(
        env: Env,
        caller: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), ProviderError> {
        let config = load_config(&env)?;
        require_admin_or_agent(&env, &caller, &config)?;

        if amount <= 0 {
            return Err(ProviderError::InvalidAmount);
        }

        token::Client::new(&env, &token).transfer(
            &env.current_contract_address(),
            &config.agent,
            &amount,
        );

        emit_token_refunded(&env, &caller, &token, amount);

        Ok(())
    }

    /// Refund a held position token to the agent
    pub fn refund_position(env: Env, caller: Address, token_id: u32) -> Result<(), ProviderError> {
        let config = load_config(&env)?;
        require_admin_or_agent(&env, &caller, &config)?;

        position_manager_transfer(
            &env,
            &config.position_manager,
            &env.current_contract_address(),
            &config.agent,
            token_id,
        );

        emit_position_refunded(&env, &caller, &config.position_manager, token_id);

        Ok(())
    }

    // ========================================================
    // ADMINISTRATION
    // ========================================================

    /// Transfer the admin role; callable by the current admin or the
    /// agent only
    pub fn set_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), ProviderError> {
        let config = load_config(&env)?;
        require_admin_or_agent(&env, &caller, &config)?;

        write_admin(&env, &new_admin);
        emit_admin_set(&env, &new_admin);

        Ok(())
    }

    // ========================================================
    // VIEW FUNCTIONS
    // ========================================================

    /// Current admin
    pub fn admin(env: Env) -> Address {
        read_admin(&env)
    }

    /// Deployment configuration
    pub fn get_config(env: Env) -> ProviderConfig {
        read_config(&env).expect("provider not initialized")
    }

    /// Lifecycle status
    pub fn status(env: Env) -> ProviderStatus {
        read_status(&env)
    }

    /// The active position record, if any
    pub fn get_position(env: Env) -> Option<PositionRecord> {
        read_position(&env)
    }

    /// Live pool tick
    pub fn get_current_tick(env: Env) -> i32 {
        let config = read_config(&env).expect("provider not initialized");
        pool_state(&env, &config.pool).current_tick
    }

    /// Live pool spot price (token1 per token0), 1e18-scaled
    pub fn get_spot_price(env: Env) -> u128 {
        let config = read_config(&env).expect("provider not initialized");
        let state = pool_state(&env, &config.pool);
        spot_price_e18(&env, state.sqrt_price_x96)
    }

    /// Deviation score between two prices in [0, TOTAL_POINTS]
    pub fn deviation_points(env: Env, base: i128, value: i128) -> Result<u32, ProviderError> {
        if base <= 0 {
            return Err(ProviderError::ZeroBasePrice);
        }
        Ok(price_deviation_points(
            &env,
            base as u128,
            i128_to_u128_safe(value),
        ))
    }

    /// Preview the token amounts a seeding of `budget` would deposit at
    /// the live pool price
    pub fn calc_seed_amounts(env: Env, budget: i128) -> Result<(i128, i128), ProviderError> {
        let config = load_config(&env)?;

        if budget <= 0 {
            return Err(ProviderError::InvalidAmount);
        }

        let rate = wrapper_base_per_token(&env, &config.staked_token);
        if rate <= 0 {
            return Err(ProviderError::ZeroBasePrice);
        }

        let state = pool_state(&env, &config.pool);
        let sqrt_lower = get_sqrt_ratio_at_tick(&env, config.position_lower_tick);
        let sqrt_upper = get_sqrt_ratio_at_tick(&env, config.position_upper_tick);
        let (amount0, amount1, _) = plan_seed_amounts(
            &env,
            state.sqrt_price_x96,
            sqrt_lower,
            sqrt_upper,
            rate as u128,
            i128_to_u128_safe(budget),
        );

        Ok((
            u128_to_i128_saturating(amount0),
            u128_to_i128_saturating(amount1),
        ))
    }
}

// ============================================================
// INTERNAL HELPERS
// ============================================================

fn load_config(env: &Env) -> Result<ProviderConfig, ProviderError> {
    read_config(env).ok_or(ProviderError::NotInitialized)
}

/// The authorization predicate shared by every gated entry point:
/// the caller must be the mutable admin or the fixed agent
fn require_admin_or_agent(
    env: &Env,
    caller: &Address,
    config: &ProviderConfig,
) -> Result<(), ProviderError> {
    caller.require_auth();

    let admin = read_admin(env);
    if caller != &admin && caller != &config.agent {
        return Err(ProviderError::NotAdminOrAgent);
    }

    Ok(())
}

// ============================================================
// EXTERNAL CONTRACT CALLS
// ============================================================

fn pool_state(env: &Env, pool: &Address) -> PoolState {
    env.invoke_contract(pool, &Symbol::new(env, "get_state"), ().into_val(env))
}

fn oracle_latest_price(env: &Env, oracle: &Address) -> i128 {
    env.invoke_contract(oracle, &Symbol::new(env, "latest_price"), ().into_val(env))
}

fn wrapper_base_per_token(env: &Env, wrapper: &Address) -> i128 {
    env.invoke_contract(wrapper, &Symbol::new(env, "base_per_token"), ().into_val(env))
}

fn wrapper_wrap(env: &Env, wrapper: &Address, to: &Address, base_amount: i128) -> i128 {
    env.invoke_contract(
        wrapper,
        &Symbol::new(env, "wrap"),
        (to, base_amount).into_val(env),
    )
}

fn position_manager_mint(
    env: &Env,
    position_manager: &Address,
    recipient: &Address,
    lower_tick: i32,
    upper_tick: i32,
    amount0_desired: i128,
    amount1_desired: i128,
) -> (u32, i128, i128, i128) {
    env.invoke_contract(
        position_manager,
        &Symbol::new(env, "mint"),
        (recipient, lower_tick, upper_tick, amount0_desired, amount1_desired).into_val(env),
    )
}

fn position_manager_transfer(
    env: &Env,
    position_manager: &Address,
    from: &Address,
    to: &Address,
    token_id: u32,
) {
    let _: () = env.invoke_contract(
        position_manager,
        &Symbol::new(env, "transfer"),
        (from, to, token_id).into_val(env),
    );
}

fn position_manager_owner_of(env: &Env, position_manager: &Address, token_id: u32) -> Address {
    env.invoke_contract(
        position_manager,
        &Symbol::new(env, "owner_of"),
        (token_id,).into_val(env),
    )
}

fn position_manager_collect(
    env: &Env,
    position_manager: &Address,
    token_id: u32,
    recipient: &Address,
) -> (i128, i128) {
    env.invoke_contract(
        position_manager,
        &Symbol::new(env, "collect"),
        (token_id, recipient).into_val(env),
    )
}

fn position_manager_decrease(
    env: &Env,
    position_manager: &Address,
    token_id: u32,
    liquidity: i128,
) -> (i128, i128) {
    env.invoke_contract(
        position_manager,
        &Symbol::new(env, "decrease_liquidity"),
        (token_id, liquidity).into_val(env),
    )
}

fn position_manager_burn(env: &Env, position_manager: &Address, token_id: u32) {
    let _: () = env.invoke_contract(
        position_manager,
        &Symbol::new(env, "burn"),
        (token_id,).into_val(env),
    );
}
