//! Inbound payload delivery tests: the two-layer authentication, the decode
//! checks, funds validation, and the idempotent account materialization.

mod mocks;

use cosmwasm_std::{coins, to_json_binary, Addr, Binary, Timestamp, Uint128};
use cw_multi_test::{App, BankSudo, Executor, SudoMsg};

use common::address::encode_bech32_address;
use common::engine::Recipe;
use common::payload::{BridgePayload, HEADER_SIZE};
use common::AssetInfo;
use deposit_executor::derive_account_id;
use deposit_executor::msg::{
    DerivedAccountResponse, EscrowAccountResponse, EscrowAccountsResponse, ExecuteMsg,
    InstantiateMsg, QueryMsg, ReceiveMsg, StatsResponse,
};
use deposit_executor::ContractError;

use mocks::{endpoint_contract, engine_contract, EndpointExecuteMsg, EndpointInstantiateMsg, EngineInstantiateMsg};

// ============================================================================
// Test Setup
// ============================================================================

const CAMPAIGN: [u8; 32] = [0x33; 32];
const DENOM: &str = "utoken";
const ADAPTER: &str = "terra1adapter";

const OWNER_A: [u8; 20] = [0xB1; 20];
const OWNER_B: [u8; 20] = [0xB2; 20];

fn contract_executor() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    Box::new(cw_multi_test::ContractWrapper::new(
        deposit_executor::contract::execute,
        deposit_executor::contract::instantiate,
        deposit_executor::contract::query,
    ))
}

fn campaign_hash() -> Binary {
    Binary::from(CAMPAIGN.to_vec())
}

#[allow(dead_code)]
struct TestEnv {
    app: App,
    executor: Addr,
    endpoint: Addr,
    admin: Addr,
    user: Addr,
    unlock: Timestamp,
}

fn setup() -> TestEnv {
    let mut app = App::default();

    let admin = Addr::unchecked("terra1admin");
    let user = Addr::unchecked("terra1user");

    let endpoint_code = app.store_code(endpoint_contract());
    let endpoint = app
        .instantiate_contract(
            endpoint_code,
            admin.clone(),
            &EndpointInstantiateMsg {
                adapters: vec![(DENOM.to_string(), ADAPTER.to_string())],
            },
            &[],
            "endpoint",
            None,
        )
        .unwrap();

    let engine_code = app.store_code(engine_contract());
    let engine = app
        .instantiate_contract(
            engine_code,
            admin.clone(),
            &EngineInstantiateMsg {},
            &[],
            "engine",
            None,
        )
        .unwrap();

    let executor_code = app.store_code(contract_executor());
    let executor = app
        .instantiate_contract(
            executor_code,
            admin.clone(),
            &InstantiateMsg {
                admin: admin.to_string(),
                transport_endpoint: endpoint.to_string(),
                script_engine: engine.to_string(),
                address_prefix: "terra".to_string(),
            },
            &[],
            "deposit-executor",
            Some(admin.to_string()),
        )
        .unwrap();

    let unlock = app.block_info().time.plus_seconds(1000);
    app.execute_contract(
        admin.clone(),
        executor.clone(),
        &ExecuteMsg::CreateCampaign {
            campaign_hash: campaign_hash(),
            owner: admin.to_string(),
            input_token: AssetInfo::Native {
                denom: DENOM.to_string(),
            },
            unlock_timestamp: unlock,
            deposit_recipe: Recipe::empty(),
            withdrawal_recipe: Recipe::empty(),
        },
        &[],
    )
    .unwrap();

    TestEnv {
        app,
        executor,
        endpoint,
        admin,
        user,
        unlock,
    }
}

fn build_payload(campaign: &[u8; 32], nonce: u64, entries: &[([u8; 20], u128)]) -> (Binary, u128) {
    let mut payload = BridgePayload::init(campaign, nonce, entries.len());
    let mut total: u128 = 0;
    for (i, (owner, amount)) in entries.iter().enumerate() {
        payload.write_entry(i, owner, *amount);
        total += amount;
    }
    (Binary::from(payload.into_bytes()), total)
}

/// Deliver raw payload bytes through the endpoint with `funded` DENOM.
fn deliver_raw(
    env: &mut TestEnv,
    payload: Binary,
    funded: u128,
    from: &str,
) -> anyhow::Result<cw_multi_test::AppResponse> {
    if funded > 0 {
        env.app
            .sudo(SudoMsg::Bank(BankSudo::Mint {
                to_address: env.endpoint.to_string(),
                amount: coins(funded, DENOM),
            }))
            .unwrap();
    }
    let funds = if funded > 0 {
        coins(funded, DENOM)
    } else {
        vec![]
    };
    env.app.execute_contract(
        env.admin.clone(),
        env.endpoint.clone(),
        &EndpointExecuteMsg::Deliver {
            target: env.executor.to_string(),
            msg: to_json_binary(&ExecuteMsg::ReceivePayload {
                message_id: Binary::from([0x88; 32].to_vec()),
                from: from.to_string(),
                payload,
            })
            .unwrap(),
            funds,
        },
        &[],
    )
}

// ============================================================================
// Authentication
// ============================================================================

#[test]
fn direct_caller_must_be_transport_endpoint() {
    let mut env = setup();
    let (payload, total) = build_payload(&CAMPAIGN, 1, &[(OWNER_A, 100)]);
    env.app
        .sudo(SudoMsg::Bank(BankSudo::Mint {
            to_address: env.user.to_string(),
            amount: coins(total, DENOM),
        }))
        .unwrap();

    let err = env
        .app
        .execute_contract(
            env.user.clone(),
            env.executor.clone(),
            &ExecuteMsg::ReceivePayload {
                message_id: Binary::from([0x88; 32].to_vec()),
                from: ADAPTER.to_string(),
                payload,
            },
            &coins(total, DENOM),
        )
        .unwrap_err();
    assert_eq!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::UnauthorizedTransport
    );
}

#[test]
fn reported_origin_must_match_token_adapter() {
    let mut env = setup();
    let (payload, total) = build_payload(&CAMPAIGN, 1, &[(OWNER_A, 100)]);

    let err = deliver_raw(&mut env, payload, total, "terra1wrongadapter").unwrap_err();
    assert!(
        err.root_cause()
            .to_string()
            .contains("Token adapter mismatch"),
        "unexpected error: {}",
        err.root_cause()
    );
}

// ============================================================================
// Materialization
// ============================================================================

#[test]
fn delivery_materializes_escrow_accounts() {
    let mut env = setup();
    let (payload, total) = build_payload(&CAMPAIGN, 7, &[(OWNER_A, 100), (OWNER_B, 200)]);

    let res = deliver_raw(&mut env, payload, total, ADAPTER).unwrap();

    let event = res
        .events
        .iter()
        .find(|e| {
            e.ty == "wasm"
                && e.attributes
                    .iter()
                    .any(|a| a.key == "method" && a.value == "receive_payload")
        })
        .expect("receive event missing");
    assert!(event
        .attributes
        .iter()
        .any(|a| a.key == "accounts_created" && a.value == "2"));
    assert!(event
        .attributes
        .iter()
        .any(|a| a.key == "nonce" && a.value == "7"));

    let id_a = derive_account_id(&CAMPAIGN, &OWNER_A, 100, env.unlock.seconds());
    let account: EscrowAccountResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.executor,
            &QueryMsg::EscrowAccount {
                account_id: Binary::from(id_a.to_vec()),
            },
        )
        .unwrap();
    assert_eq!(
        account.owner,
        Addr::unchecked(encode_bech32_address(&OWNER_A, "terra").unwrap())
    );
    assert_eq!(account.amount, Uint128::new(100));
    assert_eq!(account.unlock_timestamp, env.unlock);
    assert!(!account.deposit_script_executed);
    assert!(!account.funds_disbursed);
    assert_eq!(account.campaign_hash, campaign_hash());

    // The executor custodies the delivered total
    let balance = env
        .app
        .wrap()
        .query_balance(&env.executor, DENOM)
        .unwrap()
        .amount;
    assert_eq!(balance, Uint128::new(300));

    let stats: StatsResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.executor, &QueryMsg::Stats {})
        .unwrap();
    assert_eq!(stats.messages_processed, 1);
    assert_eq!(stats.accounts_created, 2);
}

#[test]
fn identical_redelivery_is_inert() {
    let mut env = setup();
    let (payload, total) = build_payload(&CAMPAIGN, 7, &[(OWNER_A, 100), (OWNER_B, 200)]);

    deliver_raw(&mut env, payload.clone(), total, ADAPTER).unwrap();
    deliver_raw(&mut env, payload, total, ADAPTER).unwrap();

    let accounts: EscrowAccountsResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.executor,
            &QueryMsg::EscrowAccounts {
                start_after: None,
                limit: None,
            },
        )
        .unwrap();
    assert_eq!(accounts.accounts.len(), 2);

    // No double credit on the re-delivered entries
    let id_a = derive_account_id(&CAMPAIGN, &OWNER_A, 100, env.unlock.seconds());
    let account: EscrowAccountResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.executor,
            &QueryMsg::EscrowAccount {
                account_id: Binary::from(id_a.to_vec()),
            },
        )
        .unwrap();
    assert_eq!(account.amount, Uint128::new(100));

    let stats: StatsResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.executor, &QueryMsg::Stats {})
        .unwrap();
    assert_eq!(stats.messages_processed, 2);
    assert_eq!(stats.accounts_created, 2);
}

// ============================================================================
// Decode Failures (permanent)
// ============================================================================

#[test]
fn entryless_message_rejected_as_truncated() {
    let mut env = setup();
    let (payload, _) = build_payload(&CAMPAIGN, 1, &[]);

    let err = deliver_raw(&mut env, payload, 0, ADAPTER).unwrap_err();
    assert!(
        err.root_cause().to_string().contains("Truncated message"),
        "unexpected error: {}",
        err.root_cause()
    );
}

#[test]
fn short_buffer_rejected_as_truncated() {
    let mut env = setup();
    let payload = Binary::from(vec![0u8; HEADER_SIZE - 1]);

    let err = deliver_raw(&mut env, payload, 0, ADAPTER).unwrap_err();
    assert!(
        err.root_cause().to_string().contains("Truncated payload"),
        "unexpected error: {}",
        err.root_cause()
    );
}

#[test]
fn misaligned_buffer_rejected() {
    let mut env = setup();
    let mut bytes = vec![0u8; HEADER_SIZE];
    bytes[0..32].copy_from_slice(&CAMPAIGN);
    bytes.extend_from_slice(&[0u8; 33]);

    let err = deliver_raw(&mut env, Binary::from(bytes), 0, ADAPTER).unwrap_err();
    assert!(
        err.root_cause().to_string().contains("Misaligned"),
        "unexpected error: {}",
        err.root_cause()
    );
}

#[test]
fn unknown_campaign_rejected() {
    let mut env = setup();
    let (payload, total) = build_payload(&[0xEF; 32], 1, &[(OWNER_A, 100)]);

    let err = deliver_raw(&mut env, payload, total, ADAPTER).unwrap_err();
    assert!(
        err.root_cause().to_string().contains("Campaign not found"),
        "unexpected error: {}",
        err.root_cause()
    );
}

#[test]
fn delivered_amount_must_match_payload_total() {
    let mut env = setup();
    let (payload, total) = build_payload(&CAMPAIGN, 1, &[(OWNER_A, 100), (OWNER_B, 200)]);

    let err = deliver_raw(&mut env, payload, total - 1, ADAPTER).unwrap_err();
    assert!(
        err.root_cause()
            .to_string()
            .contains("Delivered amount mismatch"),
        "unexpected error: {}",
        err.root_cause()
    );
}

// ============================================================================
// CW20 Delivery
// ============================================================================

#[test]
fn cw20_delivery_authenticates_both_layers() {
    let mut env = setup();

    let cw20_code = env
        .app
        .store_code(Box::new(cw_multi_test::ContractWrapper::new(
            cw20_base::contract::execute,
            cw20_base::contract::instantiate,
            cw20_base::contract::query,
        )));
    let token = env
        .app
        .instantiate_contract(
            cw20_code,
            env.admin.clone(),
            &cw20_base::msg::InstantiateMsg {
                name: "Campaign Token".to_string(),
                symbol: "CTKN".to_string(),
                decimals: 6,
                initial_balances: vec![
                    cw20::Cw20Coin {
                        address: env.endpoint.to_string(),
                        amount: Uint128::new(1000),
                    },
                    cw20::Cw20Coin {
                        address: env.user.to_string(),
                        amount: Uint128::new(1000),
                    },
                ],
                mint: None,
                marketing: None,
            },
            &[],
            "campaign-token",
            None,
        )
        .unwrap();

    // A CW20 campaign plus its adapter wiring on a fresh endpoint
    let endpoint_code = env.app.store_code(endpoint_contract());
    let endpoint = env
        .app
        .instantiate_contract(
            endpoint_code,
            env.admin.clone(),
            &EndpointInstantiateMsg {
                adapters: vec![(token.to_string(), "terra1cw20adapter".to_string())],
            },
            &[],
            "cw20-endpoint",
            None,
        )
        .unwrap();
    env.app
        .execute_contract(
            env.admin.clone(),
            env.executor.clone(),
            &ExecuteMsg::SetTransportEndpoint {
                address: endpoint.to_string(),
            },
            &[],
        )
        .unwrap();

    let cw20_campaign = [0x66u8; 32];
    env.app
        .execute_contract(
            env.admin.clone(),
            env.executor.clone(),
            &ExecuteMsg::CreateCampaign {
                campaign_hash: Binary::from(cw20_campaign.to_vec()),
                owner: env.admin.to_string(),
                input_token: AssetInfo::Cw20 {
                    contract_addr: token.clone(),
                },
                unlock_timestamp: env.unlock,
                deposit_recipe: Recipe::empty(),
                withdrawal_recipe: Recipe::empty(),
            },
            &[],
        )
        .unwrap();

    let (payload, total) = build_payload(&cw20_campaign, 2, &[(OWNER_A, 150)]);
    let hook = to_json_binary(&ReceiveMsg::ReceivePayload {
        message_id: Binary::from([0x99; 32].to_vec()),
        from: "terra1cw20adapter".to_string(),
        payload: payload.clone(),
    })
    .unwrap();

    // A random CW20 holder cannot impersonate the endpoint
    let err = env
        .app
        .execute_contract(
            env.user.clone(),
            token.clone(),
            &cw20::Cw20ExecuteMsg::Send {
                contract: env.executor.to_string(),
                amount: Uint128::new(total),
                msg: hook.clone(),
            },
            &[],
        )
        .unwrap_err();
    assert!(
        err.root_cause()
            .to_string()
            .contains("caller is not the transport endpoint"),
        "unexpected error: {}",
        err.root_cause()
    );

    // The endpoint delivers through the token's receiver hook
    env.app
        .execute_contract(
            env.admin.clone(),
            endpoint.clone(),
            &EndpointExecuteMsg::Deliver {
                target: token.to_string(),
                msg: to_json_binary(&cw20::Cw20ExecuteMsg::Send {
                    contract: env.executor.to_string(),
                    amount: Uint128::new(total),
                    msg: hook,
                })
                .unwrap(),
                funds: vec![],
            },
            &[],
        )
        .unwrap();

    let id = derive_account_id(&cw20_campaign, &OWNER_A, 150, env.unlock.seconds());
    let account: EscrowAccountResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.executor,
            &QueryMsg::EscrowAccount {
                account_id: Binary::from(id.to_vec()),
            },
        )
        .unwrap();
    assert_eq!(account.amount, Uint128::new(150));

    let balance: cw20::BalanceResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &token,
            &cw20::Cw20QueryMsg::Balance {
                address: env.executor.to_string(),
            },
        )
        .unwrap();
    assert_eq!(balance.balance, Uint128::new(150));
}

// ============================================================================
// Deterministic Derivation
// ============================================================================

#[test]
fn derive_query_matches_library_derivation() {
    let env = setup();
    let owner = encode_bech32_address(&OWNER_A, "terra").unwrap();

    let res: DerivedAccountResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.executor,
            &QueryMsg::DeriveAccountId {
                campaign_hash: campaign_hash(),
                owner: owner.clone(),
                amount: Uint128::new(100_000_000),
                unlock_timestamp: env.unlock,
            },
        )
        .unwrap();

    let expected = derive_account_id(&CAMPAIGN, &OWNER_A, 100_000_000, env.unlock.seconds());
    assert_eq!(res.account_id.as_slice(), expected.as_slice());

    // Same four-tuple, same id, on repeat
    let again: DerivedAccountResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.executor,
            &QueryMsg::DeriveAccountId {
                campaign_hash: campaign_hash(),
                owner,
                amount: Uint128::new(100_000_000),
                unlock_timestamp: env.unlock,
            },
        )
        .unwrap();
    assert_eq!(res.account_id, again.account_id);
}
