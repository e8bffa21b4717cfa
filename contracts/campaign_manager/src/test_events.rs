extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger},
    token, vec, Address, Env, IntoVal, String, TryIntoVal, Val, Vec,
};

use crate::events::{CampaignActivated, CampaignCreated, CampaignFunded};
use crate::{CampaignManager, CampaignManagerClient};

fn setup() -> (Env, CampaignManagerClient<'static>, token::Client<'static>) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = 1_700_000_000);
    let contract_id = env.register(CampaignManager, ());
    let client = CampaignManagerClient::new(&env, &contract_id);

    let token_admin = Address::generate(&env);
    let token_addr = env.register_stellar_asset_contract_v2(token_admin);
    let token = token::Client::new(&env, &token_addr.address());

    client.init(&Address::generate(&env), &token.address);
    (env, client, token)
}

fn topics(env: &Env, name: soroban_sdk::Symbol, campaign_id: u64) -> Vec<Val> {
    vec![env, name.into_val(env), campaign_id.into_val(env)]
}

#[test]
fn test_init_event() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(CampaignManager, ());
    let client = CampaignManagerClient::new(&env, &contract_id);
    let owner = Address::generate(&env);
    let token = Address::generate(&env);

    client.init(&owner, &token);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics: Vec<Val> = vec![&env, symbol_short!("init").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);
    let data: Address = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(data, owner);
}

#[test]
fn test_campaign_created_event() {
    let (env, client, _) = setup();
    let manager = Address::generate(&env);
    let start = env.ledger().timestamp() + 100;
    let end = start + 1_000;
    let metadata_ref = String::from_str(&env, "QmHash");

    let id = client.create_campaign(&manager, &start, &end, &10, &15, &metadata_ref);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    assert_eq!(last_event.1, topics(&env, symbol_short!("created"), id));

    let event_data: CampaignCreated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        CampaignCreated {
            campaign_id: id,
            manager,
            start_time: start,
            end_time: end,
            goal: 10,
            cap: 15,
            metadata_ref,
        }
    );
}

#[test]
fn test_campaign_funded_and_activated_events() {
    let (env, client, token) = setup();
    let manager = Address::generate(&env);
    let funder = Address::generate(&env);
    token::StellarAssetClient::new(&env, &token.address).mint(&funder, &1_000);

    let start = env.ledger().timestamp() + 100;
    let id = client.create_campaign(
        &manager,
        &start,
        &(start + 1_000),
        &10,
        &15,
        &String::from_str(&env, "QmHash"),
    );
    env.ledger().with_mut(|li| li.timestamp = start + 1);

    client.fund_campaign(&id, &funder, &400);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");
    assert_eq!(last_event.0, client.address);
    assert_eq!(last_event.1, topics(&env, symbol_short!("funded"), id));
    let funded: CampaignFunded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        funded,
        CampaignFunded {
            campaign_id: id,
            funder: funder.clone(),
            amount: 400,
            balance: 400,
        }
    );

    let activated = all_events
        .iter()
        .find(|e| e.1 == topics(&env, symbol_short!("active"), id))
        .expect("No activation event");
    let activated: CampaignActivated = activated.2.try_into_val(&env).unwrap();
    assert_eq!(
        activated,
        CampaignActivated {
            campaign_id: id,
            activated_at: start + 1,
        }
    );

    // Activation fires once per campaign.
    client.fund_campaign(&id, &funder, &100);
    let all_events = env.events().all();
    let activations = all_events
        .iter()
        .filter(|e| e.1 == topics(&env, symbol_short!("active"), id))
        .count();
    assert!(activations <= 1);
    let last_event = all_events.last().expect("No events found");
    let funded: CampaignFunded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(funded.balance, 500);
}
