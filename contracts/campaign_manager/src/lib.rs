//! # Campaign Manager Contract
//!
//! A minimal fundraising ledger. Managers open campaigns with a funding
//! window and a goal/cap pair; funders contribute a single token while the
//! window is open.
//!
//! | Phase     | Entry Point(s)                                 |
//! |-----------|------------------------------------------------|
//! | Bootstrap | [`CampaignManager::init`]                      |
//! | Creation  | [`CampaignManager::create_campaign`]           |
//! | Funding   | [`CampaignManager::fund_campaign`]             |
//! | Queries   | `fetch_campaign`, `campaign_count`, `owner`, `token` |
//!
//! Every invocation is atomic: a failing call leaves storage and token
//! balances untouched.
//!
//! Storage access is delegated to [`storage`], event emission to [`events`].

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Env, String,
};

pub mod events;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

use events::{CampaignActivated, CampaignCreated, CampaignFunded};
pub use types::{Campaign, CampaignConfig, CampaignLedgerState, CampaignState};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    InvalidTimeRange     = 1,
    StartTimeInPast      = 2,
    InvalidGoalCap       = 3,
    OutsideFundingWindow = 4,
    CampaignNotFound     = 5,
    InvalidAmount        = 6,
    ArithmeticOverflow   = 7,
    AlreadyInitialized   = 8,
    NotInitialized       = 9,
}

/// Coarse classification of [`Error`] codes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// A campaign-creation invariant was violated.
    Validation,
    /// Funding attempted outside the campaign window.
    Timing,
    /// Unknown campaign id.
    NotFound,
    Other,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidTimeRange | Error::StartTimeInPast | Error::InvalidGoalCap => {
                ErrorKind::Validation
            }
            Error::OutsideFundingWindow => ErrorKind::Timing,
            Error::CampaignNotFound => ErrorKind::NotFound,
            Error::InvalidAmount
            | Error::ArithmeticOverflow
            | Error::AlreadyInitialized
            | Error::NotInitialized => ErrorKind::Other,
        }
    }
}

#[contract]
pub struct CampaignManager;

#[contractimpl]
impl CampaignManager {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the ledger with its owner and the token accepted for
    /// contributions.
    ///
    /// Must be called exactly once immediately after deployment.
    /// Subsequent calls panic with `Error::AlreadyInitialized`.
    pub fn init(env: Env, owner: Address, token: Address) {
        owner.require_auth();
        if storage::is_initialized(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        storage::set_config(&env, &owner, &token);
        events::emit_initialized(&env, &owner);
    }

    pub fn owner(env: Env) -> Address {
        storage::get_owner(&env).unwrap_or_else(|| panic_with_error!(&env, Error::NotInitialized))
    }

    pub fn token(env: Env) -> Address {
        storage::get_token(&env).unwrap_or_else(|| panic_with_error!(&env, Error::NotInitialized))
    }

    /// Number of campaigns ever created. Ids are `0..campaign_count()`.
    pub fn campaign_count(env: Env) -> u64 {
        storage::campaign_count(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Campaign lifecycle
    // ─────────────────────────────────────────────────────────

    /// Open a new campaign managed by `manager` and return its id.
    ///
    /// Requires `start_time < end_time`, `start_time` strictly after the
    /// current ledger timestamp, and `0 <= goal < cap`.
    pub fn create_campaign(
        env: Env,
        manager: Address,
        start_time: u64,
        end_time: u64,
        goal: i128,
        cap: i128,
        metadata_ref: String,
    ) -> u64 {
        manager.require_auth();
        if !storage::is_initialized(&env) {
            panic_with_error!(&env, Error::NotInitialized);
        }

        if start_time >= end_time {
            panic_with_error!(&env, Error::InvalidTimeRange);
        }
        if start_time <= env.ledger().timestamp() {
            panic_with_error!(&env, Error::StartTimeInPast);
        }
        if goal < 0 || goal >= cap {
            panic_with_error!(&env, Error::InvalidGoalCap);
        }

        let campaign_id = storage::get_and_increment_campaign_id(&env);
        let config = CampaignConfig {
            manager: manager.clone(),
            start_time,
            end_time,
            goal,
            cap,
            metadata_ref: metadata_ref.clone(),
        };
        storage::save_new_campaign(&env, campaign_id, &config);

        events::emit_campaign_created(
            &env,
            CampaignCreated {
                campaign_id,
                manager,
                start_time,
                end_time,
                goal,
                cap,
                metadata_ref,
            },
        );

        campaign_id
    }

    /// Contribute `amount` of the ledger token from `funder` to a campaign.
    ///
    /// Only accepted while the ledger timestamp is in `[start_time, end_time)`.
    /// The first accepted contribution moves the campaign to `Active`.
    pub fn fund_campaign(env: Env, campaign_id: u64, funder: Address, amount: i128) {
        funder.require_auth();

        let token = storage::get_token(&env)
            .unwrap_or_else(|| panic_with_error!(&env, Error::NotInitialized));
        let config = storage::load_campaign_config(&env, campaign_id)
            .unwrap_or_else(|| panic_with_error!(&env, Error::CampaignNotFound));
        let mut state = storage::load_campaign_state(&env, campaign_id)
            .unwrap_or_else(|| panic_with_error!(&env, Error::CampaignNotFound));

        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }
        let now = env.ledger().timestamp();
        if !config.is_open_at(now) {
            panic_with_error!(&env, Error::OutsideFundingWindow);
        }

        state.balance = state
            .balance
            .checked_add(amount)
            .unwrap_or_else(|| panic_with_error!(&env, Error::ArithmeticOverflow));

        token::Client::new(&env, &token).transfer(
            &funder,
            &env.current_contract_address(),
            &amount,
        );

        state.funders.push_back(funder.clone());
        let activated = state.state == CampaignState::NotStarted;
        if activated {
            state.state = CampaignState::Active;
        }
        storage::save_campaign_state(&env, campaign_id, &state);

        if activated {
            events::emit_campaign_activated(
                &env,
                CampaignActivated {
                    campaign_id,
                    activated_at: now,
                },
            );
        }
        events::emit_campaign_funded(
            &env,
            CampaignFunded {
                campaign_id,
                funder,
                amount,
                balance: state.balance,
            },
        );
    }

    /// Return a snapshot of campaign `campaign_id`.
    pub fn fetch_campaign(env: Env, campaign_id: u64) -> Campaign {
        storage::load_campaign(&env, campaign_id)
            .unwrap_or_else(|| panic_with_error!(&env, Error::CampaignNotFound))
    }
}
