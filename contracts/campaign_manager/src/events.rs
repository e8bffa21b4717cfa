//! Contract events consumed by the off-chain indexer.
//!
//! | Topic                    | Data                |
//! |--------------------------|---------------------|
//! | `("init",)`              | owner `Address`     |
//! | `("created", id)`        | [`CampaignCreated`] |
//! | `("funded", id)`         | [`CampaignFunded`]  |
//! | `("active", id)`         | [`CampaignActivated`] |

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCreated {
    pub campaign_id: u64,
    pub manager: Address,
    pub start_time: u64,
    pub end_time: u64,
    pub goal: i128,
    pub cap: i128,
    pub metadata_ref: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignFunded {
    pub campaign_id: u64,
    pub funder: Address,
    pub amount: i128,
    /// Campaign balance after this contribution.
    pub balance: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignActivated {
    pub campaign_id: u64,
    pub activated_at: u64,
}

pub fn emit_initialized(env: &Env, owner: &Address) {
    env.events().publish((symbol_short!("init"),), owner.clone());
}

pub fn emit_campaign_created(env: &Env, event: CampaignCreated) {
    env.events()
        .publish((symbol_short!("created"), event.campaign_id), event);
}

pub fn emit_campaign_funded(env: &Env, event: CampaignFunded) {
    env.events()
        .publish((symbol_short!("funded"), event.campaign_id), event);
}

pub fn emit_campaign_activated(env: &Env, event: CampaignActivated) {
    env.events()
        .publish((symbol_short!("active"), event.campaign_id), event);
}
