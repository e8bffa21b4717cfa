//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by the ledger.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key             | Type      | Description                         |
//! |-----------------|-----------|-------------------------------------|
//! | `Owner`         | `Address` | Account that initialised the ledger |
//! | `Token`         | `Address` | Token accepted for contributions    |
//! | `CampaignCount` | `u64`     | Next campaign id / number of campaigns |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                 | Type                  | Description             |
//! |---------------------|-----------------------|-------------------------|
//! | `CampConfig(id)`    | `CampaignConfig`      | Immutable configuration |
//! | `CampState(id)`     | `CampaignLedgerState` | Balance, state, funders |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{Campaign, CampaignConfig, CampaignLedgerState, CampaignState};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Ledger owner (Instance).
    Owner,
    /// Contribution token (Instance).
    Token,
    /// Campaign id counter (Instance).
    CampaignCount,
    /// Immutable campaign configuration keyed by id (Persistent).
    CampConfig(u64),
    /// Mutable campaign state keyed by id (Persistent).
    CampState(u64),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

/// Store the owner and contribution token. Called once from `init`.
pub fn set_config(env: &Env, owner: &Address, token: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
    env.storage().instance().set(&DataKey::Token, token);
    bump_instance(env);
}

pub fn get_owner(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Owner)
}

pub fn get_token(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Token)
}

/// Number of campaigns created so far.
pub fn campaign_count(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0)
}

/// Reads, increments, and stores the campaign counter.
/// Returns the id for the *current* campaign (pre-increment value).
pub fn get_and_increment_campaign_id(env: &Env) -> u64 {
    let current = campaign_count(env);
    env.storage()
        .instance()
        .set(&DataKey::CampaignCount, &(current + 1));
    current
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Write the configuration and the initial (empty) state of a new campaign.
pub fn save_new_campaign(env: &Env, id: u64, config: &CampaignConfig) {
    let config_key = DataKey::CampConfig(id);
    let state_key = DataKey::CampState(id);

    let state = CampaignLedgerState {
        balance: 0,
        state: CampaignState::NotStarted,
        funders: Vec::new(env),
    };

    env.storage().persistent().set(&config_key, config);
    env.storage().persistent().set(&state_key, &state);
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
}

/// Load the full campaign snapshot, or `None` if `id` was never assigned.
pub fn load_campaign(env: &Env, id: u64) -> Option<Campaign> {
    let config = load_campaign_config(env, id)?;
    let state = load_campaign_state(env, id)?;
    Some(Campaign::from_parts(config, state))
}

pub fn load_campaign_config(env: &Env, id: u64) -> Option<CampaignConfig> {
    let key = DataKey::CampConfig(id);
    let config: CampaignConfig = env.storage().persistent().get(&key)?;
    bump_persistent(env, &key);
    Some(config)
}

pub fn load_campaign_state(env: &Env, id: u64) -> Option<CampaignLedgerState> {
    let key = DataKey::CampState(id);
    let state: CampaignLedgerState = env.storage().persistent().get(&key)?;
    bump_persistent(env, &key);
    Some(state)
}

/// Rewrite only the mutable state entry.
pub fn save_campaign_state(env: &Env, id: u64, state: &CampaignLedgerState) {
    let key = DataKey::CampState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}
