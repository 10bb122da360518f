// Shared test fixture: mock collaborators and a fully wired provider.
//
// The pool and position manager mocks run the same liquidity math the
// provider plans with, so the amounts the provider computes off-pool
// can be reconciled against what the pool itself would require.

use soroban_sdk::{
    contract, contractimpl, contracttype, testutils::Address as _, token, Address, Env, IntoVal,
    Symbol,
};

use kelpseed_math::{
    get_amounts_for_liquidity, get_liquidity_for_amounts, get_sqrt_ratio_at_tick,
    i128_to_u128_safe, mul_div, u128_to_i128_saturating, RATE_SCALE,
};
use kelpseed_provider::types::{PoolState, ProviderConfig};
use kelpseed_provider::{KelpSeedProvider, KelpSeedProviderClient};

// Test constants
pub const E18: i128 = 1_000_000_000_000_000_000;
pub const SEED_AMOUNT: i128 = 600 * E18;
pub const POSITION_LOWER_TICK: i32 = 585;
pub const POSITION_UPPER_TICK: i32 = 685;
pub const MIN_ALLOWED_TICK: i32 = 582;
pub const MAX_ALLOWED_TICK: i32 = 672;
pub const INITIAL_TICK: i32 = 627;
/// Base units per 1e18 token0 units, near the live staked-asset rate
pub const STAKED_RATE_E18: i128 = 1_064_000_000_000_000_000;
/// Oracle reference close to the pool spot at INITIAL_TICK (~1.0647)
pub const ORACLE_PRICE_E18: i128 = 1_064_700_000_000_000_000;
pub const MAX_ORACLE_DEVIATION_POINTS: u32 = 50;

// ============================================================
// MOCK POOL
// ============================================================

mod mock_pool {
    use super::*;

#[contract]
pub struct MockPool;

#[contracttype]
#[derive(Clone)]
pub enum PoolKey {
    State,
    Token0,
    Token1,
    Reserve0,
    Reserve1,
}

#[contractimpl]
impl MockPool {
    pub fn initialize(
        env: Env,
        token0: Address,
        token1: Address,
        sqrt_price_x96: u128,
        current_tick: i32,
    ) {
        env.storage().instance().set(&PoolKey::Token0, &token0);
        env.storage().instance().set(&PoolKey::Token1, &token1);
        env.storage().instance().set(
            &PoolKey::State,
            &PoolState {
                sqrt_price_x96,
                current_tick,
                liquidity: 0,
            },
        );
        env.storage().instance().set(&PoolKey::Reserve0, &0i128);
        env.storage().instance().set(&PoolKey::Reserve1, &0i128);
    }

    pub fn get_state(env: Env) -> PoolState {
        env.storage().instance().get(&PoolKey::State).unwrap()
    }

    /// Fixture hook standing in for swap traffic: moves the price
    pub fn set_state(env: Env, sqrt_price_x96: u128, current_tick: i32) {
        let mut state: PoolState = env.storage().instance().get(&PoolKey::State).unwrap();
        state.sqrt_price_x96 = sqrt_price_x96;
        state.current_tick = current_tick;
        env.storage().instance().set(&PoolKey::State, &state);
    }

    /// Mint liquidity; the minter must have funded the pool up front
    pub fn mint(env: Env, lower_tick: i32, upper_tick: i32, liquidity: i128) -> (i128, i128) {
        let mut state: PoolState = env.storage().instance().get(&PoolKey::State).unwrap();

        let sqrt_lower = get_sqrt_ratio_at_tick(&env, lower_tick);
        let sqrt_upper = get_sqrt_ratio_at_tick(&env, upper_tick);
        let (amount0, amount1) = get_amounts_for_liquidity(
            &env,
            state.sqrt_price_x96,
            sqrt_lower,
            sqrt_upper,
            i128_to_u128_safe(liquidity),
        );
        let amount0 = u128_to_i128_saturating(amount0);
        let amount1 = u128_to_i128_saturating(amount1);

        let this = env.current_contract_address();
        let token0: Address = env.storage().instance().get(&PoolKey::Token0).unwrap();
        let token1: Address = env.storage().instance().get(&PoolKey::Token1).unwrap();
        let reserve0: i128 = env.storage().instance().get(&PoolKey::Reserve0).unwrap();
        let reserve1: i128 = env.storage().instance().get(&PoolKey::Reserve1).unwrap();

        if token::Client::new(&env, &token0).balance(&this) - reserve0 < amount0
            || token::Client::new(&env, &token1).balance(&this) - reserve1 < amount1
        {
            panic!("pool: mint not funded");
        }

        env.storage()
            .instance()
            .set(&PoolKey::Reserve0, &(reserve0 + amount0));
        env.storage()
            .instance()
            .set(&PoolKey::Reserve1, &(reserve1 + amount1));

        if lower_tick <= state.current_tick && state.current_tick < upper_tick {
            state.liquidity += liquidity;
        }
        env.storage().instance().set(&PoolKey::State, &state);

        (amount0, amount1)
    }

    /// Remove liquidity; amounts stay in the pool until paid out
    pub fn burn(env: Env, lower_tick: i32, upper_tick: i32, liquidity: i128) -> (i128, i128) {
        let mut state: PoolState = env.storage().instance().get(&PoolKey::State).unwrap();

        let sqrt_lower = get_sqrt_ratio_at_tick(&env, lower_tick);
        let sqrt_upper = get_sqrt_ratio_at_tick(&env, upper_tick);
        let (amount0, amount1) = get_amounts_for_liquidity(
            &env,
            state.sqrt_price_x96,
            sqrt_lower,
            sqrt_upper,
            i128_to_u128_safe(liquidity),
        );
        let amount0 = u128_to_i128_saturating(amount0);
        let amount1 = u128_to_i128_saturating(amount1);

        let reserve0: i128 = env.storage().instance().get(&PoolKey::Reserve0).unwrap();
        let reserve1: i128 = env.storage().instance().get(&PoolKey::Reserve1).unwrap();
        env.storage()
            .instance()
            .set(&PoolKey::Reserve0, &(reserve0 - amount0.min(reserve0)));
        env.storage()
            .instance()
            .set(&PoolKey::Reserve1, &(reserve1 - amount1.min(reserve1)));

        if lower_tick <= state.current_tick && state.current_tick < upper_tick {
            state.liquidity -= liquidity;
        }
        env.storage().instance().set(&PoolKey::State, &state);

        (amount0, amount1)
    }

    /// Pay tokens out of the pool (collect path)
    pub fn payout(env: Env, recipient: Address, amount0: i128, amount1: i128) {
        let this = env.current_contract_address();
        let token0: Address = env.storage().instance().get(&PoolKey::Token0).unwrap();
        let token1: Address = env.storage().instance().get(&PoolKey::Token1).unwrap();
        if amount0 > 0 {
            token::Client::new(&env, &token0).transfer(&this, &recipient, &amount0);
        }
        if amount1 > 0 {
            token::Client::new(&env, &token1).transfer(&this, &recipient, &amount1);
        }
    }
}
}
pub use mock_pool::{MockPool, MockPoolClient};

// ============================================================
// MOCK POSITION MANAGER
// ============================================================

mod mock_position_manager {
    use super::*;

#[contract]
pub struct MockPositionManager;

#[contracttype]
#[derive(Clone)]
pub struct ManagedPosition {
    pub lower_tick: i32,
    pub upper_tick: i32,
    pub liquidity: i128,
    pub owed0: i128,
    pub owed1: i128,
}

#[contracttype]
#[derive(Clone)]
pub enum PmKey {
    Pool,
    NextId,
    Position(u32),
    Owner(u32),
}

#[contractimpl]
impl MockPositionManager {
    pub fn initialize(env: Env, pool: Address) {
        env.storage().instance().set(&PmKey::Pool, &pool);
        env.storage().instance().set(&PmKey::NextId, &1u32);
    }

    pub fn mint(
        env: Env,
        recipient: Address,
        lower_tick: i32,
        upper_tick: i32,
        amount0_desired: i128,
        amount1_desired: i128,
    ) -> (u32, i128, i128, i128) {
        let pool: Address = env.storage().instance().get(&PmKey::Pool).unwrap();
        let state: PoolState =
            env.invoke_contract(&pool, &Symbol::new(&env, "get_state"), ().into_val(&env));

        let sqrt_lower = get_sqrt_ratio_at_tick(&env, lower_tick);
        let sqrt_upper = get_sqrt_ratio_at_tick(&env, upper_tick);
        let liquidity = u128_to_i128_saturating(get_liquidity_for_amounts(
            &env,
            state.sqrt_price_x96,
            sqrt_lower,
            sqrt_upper,
            i128_to_u128_safe(amount0_desired),
            i128_to_u128_safe(amount1_desired),
        ));
        if liquidity <= 0 {
            panic!("zero liquidity mint");
        }

        let (used0, used1): (i128, i128) = env.invoke_contract(
            &pool,
            &Symbol::new(&env, "mint"),
            (lower_tick, upper_tick, liquidity).into_val(&env),
        );

        let id: u32 = env.storage().instance().get(&PmKey::NextId).unwrap();
        env.storage().instance().set(&PmKey::NextId, &(id + 1));
        env.storage().instance().set(
            &PmKey::Position(id),
            &ManagedPosition {
                lower_tick,
                upper_tick,
                liquidity,
                owed0: 0,
                owed1: 0,
            },
        );
        env.storage().instance().set(&PmKey::Owner(id), &recipient);

        (id, liquidity, used0, used1)
    }

    pub fn owner_of(env: Env, token_id: u32) -> Address {
        env.storage()
            .instance()
            .get(&PmKey::Owner(token_id))
            .expect("position not found")
    }

    pub fn transfer(env: Env, from: Address, to: Address, token_id: u32) {
        from.require_auth();
        let owner = Self::owner_of(env.clone(), token_id);
        if owner != from {
            panic!("not position owner");
        }
        env.storage().instance().set(&PmKey::Owner(token_id), &to);
    }

    /// Fixture hook standing in for swap fee accrual
    pub fn accrue_fees(env: Env, token_id: u32, fees0: i128, fees1: i128) {
        let mut pos: ManagedPosition = env
            .storage()
            .instance()
            .get(&PmKey::Position(token_id))
            .expect("position not found");
        pos.owed0 += fees0;
        pos.owed1 += fees1;
        env.storage().instance().set(&PmKey::Position(token_id), &pos);
    }

    pub fn decrease_liquidity(env: Env, token_id: u32, liquidity: i128) -> (i128, i128) {
        let mut pos: ManagedPosition = env
            .storage()
            .instance()
            .get(&PmKey::Position(token_id))
            .expect("position not found");
        if liquidity <= 0 || liquidity > pos.liquidity {
            panic!("invalid liquidity amount");
        }

        let pool: Address = env.storage().instance().get(&PmKey::Pool).unwrap();
        let (amount0, amount1): (i128, i128) = env.invoke_contract(
            &pool,
            &Symbol::new(&env, "burn"),
            (pos.lower_tick, pos.upper_tick, liquidity).into_val(&env),
        );

        pos.liquidity -= liquidity;
        pos.owed0 += amount0;
        pos.owed1 += amount1;
        env.storage().instance().set(&PmKey::Position(token_id), &pos);

        (amount0, amount1)
    }

    pub fn collect(env: Env, token_id: u32, recipient: Address) -> (i128, i128) {
        let mut pos: ManagedPosition = env
            .storage()
            .instance()
            .get(&PmKey::Position(token_id))
            .expect("position not found");
        let (amount0, amount1) = (pos.owed0, pos.owed1);
        pos.owed0 = 0;
        pos.owed1 = 0;
        env.storage().instance().set(&PmKey::Position(token_id), &pos);

        if amount0 > 0 || amount1 > 0 {
            let pool: Address = env.storage().instance().get(&PmKey::Pool).unwrap();
            let _: () = env.invoke_contract(
                &pool,
                &Symbol::new(&env, "payout"),
                (recipient, amount0, amount1).into_val(&env),
            );
        }

        (amount0, amount1)
    }

    pub fn burn(env: Env, token_id: u32) {
        let pos: ManagedPosition = env
            .storage()
            .instance()
            .get(&PmKey::Position(token_id))
            .expect("position not found");
        if pos.liquidity != 0 || pos.owed0 != 0 || pos.owed1 != 0 {
            panic!("position not cleared");
        }
        env.storage().instance().remove(&PmKey::Position(token_id));
        env.storage().instance().remove(&PmKey::Owner(token_id));
    }
}
}
pub use mock_position_manager::{MockPositionManager, MockPositionManagerClient};

// ============================================================
// MOCK STAKED TOKEN (rate-bearing wrapper)
// ============================================================

mod mock_staked_token {
    use super::*;

#[contract]
pub struct MockStakedToken;

#[contracttype]
#[derive(Clone)]
pub enum StakedKey {
    BaseToken,
    Rate,
    Balance(Address),
    WrapReserve,
}

#[contractimpl]
impl MockStakedToken {
    pub fn initialize(env: Env, base_token: Address, rate_e18: i128) {
        env.storage().instance().set(&StakedKey::BaseToken, &base_token);
        env.storage().instance().set(&StakedKey::Rate, &rate_e18);
        env.storage().instance().set(&StakedKey::WrapReserve, &0i128);
    }

    /// Base units backing 1e18 token units
    pub fn base_per_token(env: Env) -> i128 {
        env.storage().instance().get(&StakedKey::Rate).unwrap()
    }

    pub fn set_rate(env: Env, rate_e18: i128) {
        env.storage().instance().set(&StakedKey::Rate, &rate_e18);
    }

    /// Convert base assets (already transferred in) into wrapper tokens
    pub fn wrap(env: Env, to: Address, base_amount: i128) -> i128 {
        if base_amount <= 0 {
            panic!("invalid wrap amount");
        }

        let base: Address = env.storage().instance().get(&StakedKey::BaseToken).unwrap();
        let reserve: i128 = env.storage().instance().get(&StakedKey::WrapReserve).unwrap();
        let held = token::Client::new(&env, &base).balance(&env.current_contract_address());
        if held - reserve < base_amount {
            panic!("wrap not funded");
        }
        env.storage()
            .instance()
            .set(&StakedKey::WrapReserve, &(reserve + base_amount));

        let rate: i128 = env.storage().instance().get(&StakedKey::Rate).unwrap();
        let minted = u128_to_i128_saturating(mul_div(
            &env,
            i128_to_u128_safe(base_amount),
            RATE_SCALE,
            i128_to_u128_safe(rate),
        ));

        Self::credit(&env, &to, minted);
        minted
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .instance()
            .get(&StakedKey::Balance(id))
            .unwrap_or(0)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            panic!("insufficient balance");
        }
        env.storage()
            .instance()
            .set(&StakedKey::Balance(from), &(from_balance - amount));
        Self::credit(&env, &to, amount);
    }

    /// Fixture hook for seeding fee balances
    pub fn mint(env: Env, to: Address, amount: i128) {
        Self::credit(&env, &to, amount);
    }
}

impl MockStakedToken {
    fn credit(env: &Env, to: &Address, amount: i128) {
        let balance: i128 = env
            .storage()
            .instance()
            .get(&StakedKey::Balance(to.clone()))
            .unwrap_or(0);
        env.storage()
            .instance()
            .set(&StakedKey::Balance(to.clone()), &(balance + amount));
    }
}
}
pub use mock_staked_token::{MockStakedToken, MockStakedTokenClient};

// ============================================================
// MOCK ORACLE
// ============================================================

mod mock_oracle {
    use super::*;

#[contract]
pub struct MockOracle;

#[contracttype]
#[derive(Clone)]
pub enum OracleKey {
    Price,
}

#[contractimpl]
impl MockOracle {
    pub fn initialize(env: Env, price_e18: i128) {
        env.storage().instance().set(&OracleKey::Price, &price_e18);
    }

    pub fn latest_price(env: Env) -> i128 {
        env.storage().instance().get(&OracleKey::Price).unwrap()
    }

    pub fn set_price(env: Env, price_e18: i128) {
        env.storage().instance().set(&OracleKey::Price, &price_e18);
    }
}
}
pub use mock_oracle::{MockOracle, MockOracleClient};

// ============================================================
// FIXTURE WIRING
// ============================================================

pub struct Rig<'a> {
    pub provider: KelpSeedProviderClient<'a>,
    pub pool: MockPoolClient<'a>,
    pub position_manager: MockPositionManagerClient<'a>,
    pub staked: MockStakedTokenClient<'a>,
    pub oracle: MockOracleClient<'a>,
    pub base_token: Address,
    pub admin: Address,
    pub agent: Address,
}

/// Register and wire every contract with default parameters
pub fn setup(env: &Env) -> Rig<'_> {
    let admin = Address::generate(env);
    let agent = Address::generate(env);

    let base_token = create_token(env, &admin);

    let staked_id = env.register(MockStakedToken, ());
    let staked = MockStakedTokenClient::new(env, &staked_id);
    staked.initialize(&base_token, &STAKED_RATE_E18);

    let pool_id = env.register(MockPool, ());
    let pool = MockPoolClient::new(env, &pool_id);
    let sqrt_price = get_sqrt_ratio_at_tick(env, INITIAL_TICK);
    pool.initialize(&staked_id, &base_token, &sqrt_price, &INITIAL_TICK);

    let pm_id = env.register(MockPositionManager, ());
    let position_manager = MockPositionManagerClient::new(env, &pm_id);
    position_manager.initialize(&pool_id);

    let oracle_id = env.register(MockOracle, ());
    let oracle = MockOracleClient::new(env, &oracle_id);
    oracle.initialize(&ORACLE_PRICE_E18);

    let provider_id = env.register(KelpSeedProvider, ());
    let provider = KelpSeedProviderClient::new(env, &provider_id);
    provider.initialize(
        &admin,
        &ProviderConfig {
            agent: agent.clone(),
            pool: pool_id,
            position_manager: pm_id,
            base_token: base_token.clone(),
            staked_token: staked_id,
            oracle: oracle_id,
            base_to_seed: SEED_AMOUNT,
            position_lower_tick: POSITION_LOWER_TICK,
            position_upper_tick: POSITION_UPPER_TICK,
            min_allowed_tick: MIN_ALLOWED_TICK,
            max_allowed_tick: MAX_ALLOWED_TICK,
            max_oracle_deviation_points: MAX_ORACLE_DEVIATION_POINTS,
        },
    );

    Rig {
        provider,
        pool,
        position_manager,
        staked,
        oracle,
        base_token,
        admin,
        agent,
    }
}

/// Create a test token
pub fn create_token(env: &Env, admin: &Address) -> Address {
    env.register_stellar_asset_contract_v2(admin.clone()).address()
}

/// Mint base tokens to an address
pub fn mint_base(env: &Env, token: &Address, to: &Address, amount: i128) {
    use soroban_sdk::token::StellarAssetClient;
    StellarAssetClient::new(env, token).mint(to, &amount);
}

/// Put the configured seed budget on the provider
pub fn fund_provider(env: &Env, rig: &Rig) {
    mint_base(env, &rig.base_token, &rig.provider.address, SEED_AMOUNT);
}
