//! # Types
//!
//! Data structures shared by the contract entry points and storage helpers.
//!
//! ## Config / State split
//!
//! A [`Campaign`] is stored as two separate ledger entries:
//!
//! - [`CampaignConfig`] — written once by `create_campaign`; never mutated.
//! - [`CampaignLedgerState`] — rewritten on every accepted contribution.
//!
//! `fetch_campaign` returns the reconstructed [`Campaign`] snapshot.
//!
//! ## Lifecycle
//!
//! ```text
//! NotStarted ──(first accepted contribution)──► Active
//! ```
//!
//! `Active` has no outgoing transitions.

use soroban_sdk::{contracttype, Address, String, Vec};

/// Lifecycle state of a campaign.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum CampaignState {
    /// No contribution received yet.
    NotStarted = 0,
    /// At least one contribution was accepted.
    Active = 1,
}

/// Immutable campaign configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    pub manager: Address,
    pub start_time: u64,
    pub end_time: u64,
    pub goal: i128,
    pub cap: i128,
    pub metadata_ref: String,
}

/// Mutable campaign state, updated by `fund_campaign`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignLedgerState {
    pub balance: i128,
    pub state: CampaignState,
    pub funders: Vec<Address>,
}

/// Snapshot of a campaign as returned by `fetch_campaign`.
///
/// Field order is part of the public contract.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    /// Account that created the campaign.
    pub manager: Address,
    /// Ledger timestamp at which contributions open (inclusive).
    pub start_time: u64,
    /// Ledger timestamp at which contributions close (exclusive).
    pub end_time: u64,
    /// Sum of all accepted contributions.
    pub balance: i128,
    /// Target raise.
    pub goal: i128,
    /// Maximum raise bound; always strictly above `goal`.
    pub cap: i128,
    /// Current lifecycle state.
    pub state: CampaignState,
    /// One entry per accepted contribution, in order. Not deduplicated.
    pub funders: Vec<Address>,
    /// Opaque off-chain reference (e.g. an IPFS CID), stored verbatim.
    pub metadata_ref: String,
}

impl Campaign {
    pub(crate) fn from_parts(config: CampaignConfig, state: CampaignLedgerState) -> Self {
        Campaign {
            manager: config.manager,
            start_time: config.start_time,
            end_time: config.end_time,
            balance: state.balance,
            goal: config.goal,
            cap: config.cap,
            state: state.state,
            funders: state.funders,
            metadata_ref: config.metadata_ref,
        }
    }
}

impl CampaignConfig {
    /// Whether `now` lies in the half-open funding window `[start_time, end_time)`.
    pub fn is_open_at(&self, now: u64) -> bool {
        self.start_time <= now && now < self.end_time
    }
}
