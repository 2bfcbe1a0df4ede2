//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port, then drives the real
//! `AdminClient` (ureq transport, auth interceptor, envelope normalizer)
//! over HTTP. This catches drift between the core's DTOs and what the server
//! actually sends.

use std::collections::BTreeMap;
use std::sync::Arc;

use recharge_admin_core::api::{
    balance, credit, external_api_key, product_interface, statistics, system_config, user, PageQuery,
};
use recharge_admin_core::isp::Isp;
use recharge_admin_core::ui::TableState;
use recharge_admin_core::{AdminClient, ApiError, Call, ClientConfig, MemoryStore, MessageLog};
use serde::Deserialize;
use serde_json::json;

struct Harness {
    client: AdminClient,
    notices: Arc<MessageLog>,
    navigations: Arc<MessageLog>,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    token: String,
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
    });

    format!("http://{addr}")
}

fn harness() -> Harness {
    let notices = Arc::new(MessageLog::new());
    let navigations = Arc::new(MessageLog::new());
    let client = AdminClient::builder(ClientConfig::new(start_server()))
        .store(Arc::new(MemoryStore::new()))
        .notifier(notices.clone())
        .navigator(navigations.clone())
        .build();
    Harness {
        client,
        notices,
        navigations,
    }
}

fn login(h: &Harness) {
    let call: Call<LoginData> = Call::post(
        "/auth/login",
        &json!({"username": mock_server::ADMIN_USERNAME, "password": mock_server::ADMIN_PASSWORD}),
    )
    .unwrap();
    let data = h.client.execute(call).unwrap();
    h.client.session().set_token(&data.token).unwrap();
}

#[test]
fn public_endpoints_work_without_a_token() {
    let h = harness();
    assert!(!h.client.session().is_authenticated());

    let name = h.client.execute(system_config::public_system_name()).unwrap();
    assert_eq!(name.system_name, mock_server::SYSTEM_NAME);

    let info = h.client.execute(system_config::public_basic_info()).unwrap();
    assert_eq!(info.system_name, mock_server::SYSTEM_NAME);
    assert!(h.navigations.messages().is_empty());
}

#[test]
fn missing_token_clears_session_and_redirects_once() {
    let h = harness();
    h.client.session().set_token("stale").unwrap();

    let err = h
        .client
        .execute(user::list(&user::UserListQuery::default()).unwrap())
        .unwrap_err();

    assert_eq!(err, ApiError::Unauthorized);
    assert!(h.client.session().token().is_none());
    assert_eq!(h.navigations.messages(), vec!["/login".to_string()]);
}

#[test]
fn wrong_password_surfaces_server_message() {
    let h = harness();
    let call: Call<LoginData> =
        Call::post("/auth/login", &json!({"username": "admin", "password": "wrong"})).unwrap();
    let err = h.client.execute(call).unwrap_err();

    assert!(matches!(err, ApiError::Application { code: 400, .. }));
    assert_eq!(h.notices.messages(), vec!["用户名或密码错误".to_string()]);
}

#[test]
fn recharge_deduct_and_read_logs() {
    let h = harness();
    login(&h);

    let receipt = h
        .client
        .execute(
            balance::recharge(&balance::RechargeRequest {
                user_id: 1,
                amount: 100.0,
                remark: "test".to_string(),
            })
            .unwrap(),
        )
        .unwrap();
    assert!(receipt.is_some_and(|r| r.id > 0));

    h.client
        .execute(
            balance::deduct(&balance::DeductRequest {
                user_id: 1,
                amount: 40.0,
                style: balance::STYLE_MANUAL,
                remark: String::new(),
            })
            .unwrap(),
        )
        .unwrap();

    let logs = h
        .client
        .execute(
            balance::logs(&balance::LogQuery {
                user_id: Some(1),
                ..balance::LogQuery::default()
            })
            .unwrap(),
        )
        .unwrap();
    assert_eq!(logs.total, 2);
    assert_eq!(logs.list[1].kind, 2);
    assert_eq!(logs.list[1].balance, 60.0);
    assert_eq!(logs.list[1].balance_before, 100.0);
}

#[test]
fn insufficient_balance_propagates_and_notifies() {
    let h = harness();
    login(&h);

    let err = h
        .client
        .execute(
            balance::deduct(&balance::DeductRequest {
                user_id: 2,
                amount: 1_000.0,
                style: balance::STYLE_MANUAL,
                remark: String::new(),
            })
            .unwrap(),
        )
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Application {
            code: 400,
            message: "余额不足".to_string()
        }
    );
    assert_eq!(h.notices.messages(), vec!["余额不足".to_string()]);
    assert!(h.client.session().is_authenticated());
}

#[test]
fn users_page_through_records_and_credit_is_applied() {
    let h = harness();
    login(&h);

    h.client
        .execute(
            credit::set_limit(&credit::CreditSetRequest {
                user_id: 2,
                credit_limit: 250.0,
                remark: "授信".to_string(),
            })
            .unwrap(),
        )
        .unwrap();

    let page = h
        .client
        .execute(
            user::list(&user::UserListQuery {
                page: 2,
                page_size: 1,
                ..user::UserListQuery::default()
            })
            .unwrap(),
        )
        .unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.records.len(), 1);
    assert_eq!(page.records[0].username, "bob");
    assert_eq!(page.records[0].credit_limit, 250.0);
}

#[test]
fn system_config_crud() {
    let h = harness();
    login(&h);

    h.client
        .execute(
            system_config::create(&system_config::CreateConfig {
                config_key: "site_notice".to_string(),
                config_value: "hello".to_string(),
                config_desc: "公告".to_string(),
                config_type: system_config::ConfigType::String,
            })
            .unwrap(),
        )
        .unwrap();

    let entry = h.client.execute(system_config::get_by_key("site_notice")).unwrap();
    assert_eq!(entry.config_value, "hello");

    h.client
        .execute(
            system_config::update(
                entry.id,
                &system_config::UpdateConfig {
                    config_value: "updated".to_string(),
                    config_desc: None,
                    config_type: None,
                },
            )
            .unwrap(),
        )
        .unwrap();

    let mut batch = BTreeMap::new();
    batch.insert("site_notice".to_string(), "batched".to_string());
    h.client.execute(system_config::batch_update(&batch).unwrap()).unwrap();

    let info = h.client.execute(system_config::system_info()).unwrap();
    assert_eq!(info.configs["site_notice"], "batched");

    let listed = h
        .client
        .execute(system_config::list(&system_config::ConfigQuery::default()).unwrap())
        .unwrap();
    assert_eq!(listed.total, 2);

    h.client.execute(system_config::delete(entry.id)).unwrap();
    let err = h.client.execute(system_config::get(entry.id)).unwrap_err();
    assert!(matches!(err, ApiError::Application { code: 404, .. }));
}

#[test]
fn config_keys_with_reserved_characters_are_looked_up_exactly() {
    let h = harness();
    login(&h);

    for key in ["site notice", "a/b", "x?y", "mixed key/with?all"] {
        h.client
            .execute(
                system_config::create(&system_config::CreateConfig {
                    config_key: key.to_string(),
                    config_value: format!("value of {key}"),
                    config_desc: String::new(),
                    config_type: system_config::ConfigType::String,
                })
                .unwrap(),
            )
            .unwrap();

        let entry = h.client.execute(system_config::get_by_key(key)).unwrap();
        assert_eq!(entry.config_key, key);
        assert_eq!(entry.config_value, format!("value of {key}"));
    }
    assert!(h.notices.messages().is_empty());
}

#[test]
fn system_name_round_trips_through_public_endpoint() {
    let h = harness();
    login(&h);

    h.client
        .execute(system_config::update_system_name("话费充值平台").unwrap())
        .unwrap();
    let name = h.client.execute(system_config::system_name()).unwrap();
    assert_eq!(name.system_name, "话费充值平台");

    h.client.session().clear().unwrap();
    let public = h.client.execute(system_config::public_system_name()).unwrap();
    assert_eq!(public.system_name, "话费充值平台");
}

#[test]
fn interface_reads_degrade_but_assignment_propagates() {
    let h = harness();
    login(&h);

    let assigned = h
        .client
        .execute(product_interface::for_product(1, PageQuery::default()).unwrap())
        .unwrap();
    assert_eq!(assigned.0.len(), 1);

    let unknown = h
        .client
        .execute(product_interface::for_product(42, PageQuery::default()).unwrap())
        .unwrap();
    assert!(unknown.0.is_empty());

    let err = h
        .client
        .execute(product_interface::assign(42, vec![1]).unwrap())
        .unwrap_err();
    assert!(matches!(err, ApiError::Application { code: 500, .. }));

    // one notification per failed call, degraded or not
    assert_eq!(h.notices.messages().len(), 2);

    let all = h
        .client
        .execute(product_interface::all(PageQuery::default()).unwrap())
        .unwrap();
    assert_eq!(all.0.len(), 3);
}

#[test]
fn operator_statistics_map_to_isps() {
    let h = harness();
    login(&h);

    let stats = h.client.execute(statistics::operator()).unwrap();
    let isps: Vec<Option<Isp>> = stats.iter().map(|s| s.operator()).collect();
    assert_eq!(isps, vec![Some(Isp::Mobile), Some(Isp::Telecom), Some(Isp::Unicom)]);
    assert_eq!(stats[0].total_orders, 120);
}

#[test]
fn api_key_lifecycle() {
    let h = harness();
    login(&h);

    assert!(h.client.execute(external_api_key::mine()).unwrap().is_none());

    let key = h
        .client
        .execute(
            external_api_key::create(&external_api_key::CreateKey {
                app_name: Some("shop".to_string()),
                description: None,
            })
            .unwrap(),
        )
        .unwrap();
    assert_eq!(key.status, 1);

    let regenerated = h.client.execute(external_api_key::regenerate(key.id)).unwrap();
    assert_eq!(regenerated.app_id, key.app_id);
    assert_ne!(regenerated.app_key, key.app_key);

    let disabled = h
        .client
        .execute(external_api_key::update_status(key.id, 0).unwrap())
        .unwrap();
    assert_eq!(disabled.status, 0);

    let mine = h.client.execute(external_api_key::mine()).unwrap();
    assert_eq!(mine.map(|k| k.status), Some(0));
}

#[test]
fn table_state_loads_pages_from_server() {
    let h = harness();
    login(&h);
    for _ in 0..3 {
        h.client
            .execute(
                balance::recharge(&balance::RechargeRequest {
                    user_id: 1,
                    amount: 10.0,
                    remark: String::new(),
                })
                .unwrap(),
            )
            .unwrap();
    }

    let mut table = TableState::with_page_sizes(vec![2, 4]);
    table.set_page(2);
    table
        .load(|q| {
            h.client.execute(balance::logs(&balance::LogQuery {
                user_id: Some(1),
                page: Some(q.page),
                page_size: Some(q.page_size),
                ..balance::LogQuery::default()
            })?)
        })
        .unwrap();

    assert_eq!(table.item_count(), 3);
    assert_eq!(table.rows().len(), 1);
    assert_eq!(table.page_count(), 2);
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let notices = Arc::new(MessageLog::new());
    let client = AdminClient::builder(ClientConfig::new("http://127.0.0.1:9"))
        .notifier(notices.clone())
        .build();

    let err = client.execute(system_config::public_system_name()).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(notices.messages().len(), 1);

    let degraded = client.execute(system_config::public_basic_info()).unwrap();
    assert_eq!(degraded, system_config::BasicInfo::default());
}
