// Provider storage module

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{PositionRecord, ProviderConfig, ProviderStatus};

// ============================================================
// STORAGE KEYS
// ============================================================

#[contracttype]
pub enum DataKey {
    /// Immutable deployment configuration
    Config,
    /// Mutable admin slot
    Admin,
    /// Initialization flag
    Initialized,
    /// Lifecycle status
    Status,
    /// Active position record
    Position,
}

// ============================================================
// TTL CONFIGURATION
// ============================================================

/// Persistent storage lifetime in ledgers (~1 year at 5s/ledger)
const PERSISTENT_LIFETIME: u32 = 6_307_200;
/// TTL bump threshold
const PERSISTENT_BUMP: u32 = 6_307_200;

/// Extend TTL for a persistent storage key
fn extend_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME, PERSISTENT_BUMP);
}

// ============================================================
// INITIALIZATION
// ============================================================

pub fn is_initialized(env: &Env) -> bool {
    env.storage().persistent().has(&DataKey::Initialized)
}

pub fn set_initialized(env: &Env) {
    env.storage().persistent().set(&DataKey::Initialized, &true);
    extend_ttl(env, &DataKey::Initialized);
}

// ============================================================
// CONFIGURATION
// ============================================================

pub fn write_config(env: &Env, config: &ProviderConfig) {
    env.storage().persistent().set(&DataKey::Config, config);
    extend_ttl(env, &DataKey::Config);
}

pub fn read_config(env: &Env) -> Option<ProviderConfig> {
    env.storage().persistent().get(&DataKey::Config)
}

// ============================================================
// ADMIN
// ============================================================

pub fn write_admin(env: &Env, admin: &Address) {
    env.storage().persistent().set(&DataKey::Admin, admin);
    extend_ttl(env, &DataKey::Admin);
}

pub fn read_admin(env: &Env) -> Address {
    env.storage()
        .persistent()
        .get(&DataKey::Admin)
        .expect("provider not initialized")
}

// ============================================================
// LIFECYCLE STATUS
// ============================================================

pub fn write_status(env: &Env, status: &ProviderStatus) {
    env.storage().persistent().set(&DataKey::Status, status);
    extend_ttl(env, &DataKey::Status);
}

pub fn read_status(env: &Env) -> ProviderStatus {
    env.storage()
        .persistent()
        .get(&DataKey::Status)
        .unwrap_or(ProviderStatus::Empty)
}

// ============================================================
// POSITION RECORD
// ============================================================

pub fn write_position(env: &Env, position: &PositionRecord) {
    env.storage().persistent().set(&DataKey::Position, position);
    extend_ttl(env, &DataKey::Position);
}

pub fn read_position(env: &Env) -> Option<PositionRecord> {
    env.storage().persistent().get(&DataKey::Position)
}

pub fn remove_position(env: &Env) {
    env.storage().persistent().remove(&DataKey::Position);
}
