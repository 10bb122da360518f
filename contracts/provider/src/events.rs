// Provider events module
// Every state-changing operation leaves one structured record

use soroban_sdk::{Address, Env, Symbol};

/// Emitted when the provider is initialized
/// Topics: ("Init",)
/// Data: (admin, agent)
pub fn emit_initialized(env: &Env, admin: &Address, agent: &Address) {
    env.events().publish(
        (Symbol::new(env, "Init"),),
        (admin.clone(), agent.clone()),
    );
}

/// Emitted when base assets are deposited into the provider
/// Topics: ("Received",)
/// Data: (from, amount)
pub fn emit_base_received(env: &Env, from: &Address, amount: i128) {
    env.events().publish(
        (Symbol::new(env, "Received"),),
        (from.clone(), amount),
    );
}

/// Emitted when the position is minted and handed to the agent
/// Topics: ("Seeded",)
/// Data: (requested_by, token_id, liquidity, amount0, amount1)
pub fn emit_seeded(
    env: &Env,
    requested_by: &Address,
    token_id: u32,
    liquidity: i128,
    amount0: i128,
    amount1: i128,
) {
    env.events().publish(
        (Symbol::new(env, "Seeded"),),
        (requested_by.clone(), token_id, liquidity, amount0, amount1),
    );
}

/// Emitted when the position is closed and proceeds forwarded
/// Topics: ("Retracted",)
/// Data: (requested_by, amount0, amount1, fees0, fees1)
pub fn emit_retracted(
    env: &Env,
    requested_by: &Address,
    amount0: i128,
    amount1: i128,
    fees0: i128,
    fees1: i128,
) {
    env.events().publish(
        (Symbol::new(env, "Retracted"),),
        (requested_by.clone(), amount0, amount1, fees0, fees1),
    );
}

/// Emitted when the held base balance is refunded to the agent
/// Topics: ("BaseRefund",)
/// Data: (requested_by, amount)
pub fn emit_base_refunded(env: &Env, requested_by: &Address, amount: i128) {
    env.events().publish(
        (Symbol::new(env, "BaseRefund"),),
        (requested_by.clone(), amount),
    );
}

/// Emitted when an arbitrary token amount is refunded to the agent
/// Topics: ("TokenRefund",)
/// Data: (requested_by, token, amount)
pub fn emit_token_refunded(env: &Env, requested_by: &Address, token: &Address, amount: i128) {
    env.events().publish(
        (Symbol::new(env, "TokenRefund"),),
        (requested_by.clone(), token.clone(), amount),
    );
}

/// Emitted when a held position token is refunded to the agent
/// Topics: ("NftRefund",)
/// Data: (requested_by, registry, token_id)
pub fn emit_position_refunded(env: &Env, requested_by: &Address, registry: &Address, token_id: u32) {
    env.events().publish(
        (Symbol::new(env, "NftRefund"),),
        (requested_by.clone(), registry.clone(), token_id),
    );
}

/// Emitted when the admin slot changes
/// Topics: ("AdminSet",)
/// Data: (admin,)
pub fn emit_admin_set(env: &Env, admin: &Address) {
    env.events().publish((Symbol::new(env, "AdminSet"),), (admin.clone(),));
}
