#![allow(dead_code)]

extern crate std;

use soroban_sdk::{Address, Vec};

use crate::types::{Campaign, CampaignState};

/// INV-1: the funding window is non-empty.
pub fn assert_window_ordered(campaign: &Campaign) {
    assert!(
        campaign.start_time < campaign.end_time,
        "INV-1 violated: start_time {} is not before end_time {}",
        campaign.start_time,
        campaign.end_time
    );
}

/// INV-2: goal is non-negative and strictly below cap.
pub fn assert_goal_below_cap(campaign: &Campaign) {
    assert!(
        campaign.goal >= 0 && campaign.goal < campaign.cap,
        "INV-2 violated: goal {} / cap {}",
        campaign.goal,
        campaign.cap
    );
}

/// INV-3: balance never goes negative.
pub fn assert_balance_non_negative(campaign: &Campaign) {
    assert!(
        campaign.balance >= 0,
        "INV-3 violated: negative balance {}",
        campaign.balance
    );
}

/// INV-4: a campaign is `Active` exactly when it has at least one funder.
pub fn assert_state_matches_funders(campaign: &Campaign) {
    let expected = if campaign.funders.is_empty() {
        CampaignState::NotStarted
    } else {
        CampaignState::Active
    };
    assert_eq!(
        campaign.state, expected,
        "INV-4 violated: state {:?} with {} funders",
        campaign.state,
        campaign.funders.len()
    );
}

/// INV-5: a contribution of `amount` raises the balance by exactly `amount`.
pub fn assert_deposit_invariant(balance_before: i128, balance_after: i128, amount: i128) {
    assert_eq!(
        balance_after,
        balance_before + amount,
        "INV-5 violated: {} + {} != {}",
        balance_before,
        amount,
        balance_after
    );
}

/// INV-6: the funder list only grows by appending; earlier entries never change.
pub fn assert_funders_append_only(before: &Vec<Address>, after: &Vec<Address>) {
    assert!(
        after.len() >= before.len(),
        "INV-6 violated: funders shrank from {} to {}",
        before.len(),
        after.len()
    );
    for i in 0..before.len() {
        assert_eq!(
            before.get(i),
            after.get(i),
            "INV-6 violated: funder at position {} changed",
            i
        );
    }
}

/// INV-7: fields fixed at creation never change.
pub fn assert_immutable_fields(original: &Campaign, current: &Campaign) {
    assert_eq!(original.manager, current.manager, "INV-7 violated: manager changed");
    assert_eq!(original.start_time, current.start_time, "INV-7 violated: start_time changed");
    assert_eq!(original.end_time, current.end_time, "INV-7 violated: end_time changed");
    assert_eq!(original.goal, current.goal, "INV-7 violated: goal changed");
    assert_eq!(original.cap, current.cap, "INV-7 violated: cap changed");
    assert_eq!(
        original.metadata_ref, current.metadata_ref,
        "INV-7 violated: metadata_ref changed"
    );
}

/// INV-8: the only legal transitions are staying put and `NotStarted -> Active`.
pub fn assert_valid_state_transition(from: &CampaignState, to: &CampaignState) {
    let valid = from == to || matches!((from, to), (CampaignState::NotStarted, CampaignState::Active));
    assert!(
        valid,
        "INV-8 violated: invalid state transition from {:?} to {:?}",
        from, to
    );
}

/// Run all stateless campaign invariants.
pub fn assert_all_campaign_invariants(campaign: &Campaign) {
    assert_window_ordered(campaign);
    assert_goal_below_cap(campaign);
    assert_balance_non_negative(campaign);
    assert_state_matches_funders(campaign);
}
