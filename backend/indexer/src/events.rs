//! Canonical event types emitted by the campaign manager contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/campaign_manager/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the campaign manager contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The ledger was initialised (`init` topic).
    LedgerInitialized,
    /// A new campaign was opened (`created` topic).
    CampaignCreated,
    /// A contribution was accepted (`funded` topic).
    CampaignFunded,
    /// A campaign received its first contribution (`active` topic).
    CampaignActivated,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "init" => Self::LedgerInitialized,
            "created" => Self::CampaignCreated,
            "funded" => Self::CampaignFunded,
            "active" => Self::CampaignActivated,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LedgerInitialized => "ledger_initialized",
            Self::CampaignCreated => "campaign_created",
            Self::CampaignFunded => "campaign_funded",
            Self::CampaignActivated => "campaign_activated",
            Self::Unknown => "unknown",
        }
    }
}

/// A fully decoded ledger event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEvent {
    pub event_type: String,
    pub campaign_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    /// Raw event data as returned by the RPC, serialised to JSON.
    pub payload: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub campaign_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub payload: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}

/// Contribution totals for one campaign, folded from its `campaign_funded` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignSummary {
    pub campaign_id: String,
    /// Number of accepted contributions.
    pub contributions: usize,
    /// Number of distinct funder addresses.
    pub unique_funders: usize,
    /// Sum of contributed amounts, as a decimal string (token amounts are i128).
    pub total_amount: String,
    pub active: bool,
}
