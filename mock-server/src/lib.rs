//! In-memory stand-in for the recharge platform's admin API.
//!
//! Every response is a `{code, message, data}` envelope. Application
//! failures are reported with HTTP 200 and a non-200 `code`, the way the
//! real backend does; only a missing or wrong bearer token gets HTTP 401.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const SYSTEM_NAME: &str = "充值管理后台";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub nickname: String,
    pub phone: String,
    pub status: i32,
    pub balance: f64,
    pub credit_limit: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BalanceLog {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: i32,
    pub style: i32,
    pub balance: f64,
    pub balance_before: f64,
    pub remark: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SystemConfig {
    pub id: i64,
    pub config_key: String,
    pub config_value: String,
    pub config_desc: String,
    pub config_type: String,
    pub status: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiInterface {
    pub id: i64,
    pub name: String,
    pub status: i32,
    #[serde(rename = "type")]
    pub kind: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: i64,
    pub app_id: String,
    pub app_key: String,
    pub app_secret: String,
    pub app_name: String,
    pub description: String,
    pub status: i32,
    pub rate_limit: i64,
}

#[derive(Debug, Default)]
pub struct Store {
    tokens: Vec<String>,
    next_id: i64,
    users: BTreeMap<i64, User>,
    balance_logs: Vec<BalanceLog>,
    configs: BTreeMap<i64, SystemConfig>,
    interfaces: Vec<ApiInterface>,
    relations: HashMap<i64, Vec<i64>>,
    api_key: Option<ApiKey>,
}

impl Store {
    /// Two users, the system-name config entry and three interfaces, one of
    /// them assigned to product 1.
    pub fn seeded() -> Self {
        let mut store = Store {
            next_id: 100,
            ..Store::default()
        };
        for (id, name, balance) in [(1, "alice", 0.0), (2, "bob", 50.0)] {
            store.users.insert(
                id,
                User {
                    id,
                    username: name.to_string(),
                    nickname: name.to_uppercase(),
                    phone: format!("1380000000{id}"),
                    status: 1,
                    balance,
                    credit_limit: 0.0,
                },
            );
        }
        store.configs.insert(
            1,
            SystemConfig {
                id: 1,
                config_key: "system_name".to_string(),
                config_value: SYSTEM_NAME.to_string(),
                config_desc: "系统名称".to_string(),
                config_type: "string".to_string(),
                status: 1,
            },
        );
        store.interfaces = ["mishi", "kekebang", "dayuanren"]
            .iter()
            .zip(1..)
            .map(|(name, id)| ApiInterface {
                id,
                name: name.to_string(),
                status: 1,
                kind: 1,
            })
            .collect();
        store.relations.insert(1, vec![1]);
        store
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn system_name(&self) -> String {
        self.configs
            .values()
            .find(|c| c.config_key == "system_name")
            .map(|c| c.config_value.clone())
            .unwrap_or_default()
    }
}

pub type Db = Arc<RwLock<Store>>;

fn ok<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({"code": 200, "message": "success", "data": data}))
}

fn fail(code: i64, message: &str) -> Json<Value> {
    Json(json!({"code": code, "message": message, "data": null}))
}

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));

    let open = Router::new()
        .route("/auth/login", post(login))
        .route("/public/system/name", get(public_system_name))
        .route("/public/system/basic-info", get(public_basic_info));

    let protected = Router::new()
        .route("/auth/logout", post(logout))
        .route("/balance/recharge", post(recharge))
        .route("/balance/deduct", post(deduct))
        .route("/balance/logs", get(balance_logs))
        .route("/users/list", get(list_users))
        .route("/credit/set", post(set_credit))
        .route("/system-config", get(list_configs).post(create_config))
        .route("/system-config/batch", put(batch_update_configs))
        .route("/system-config/system-name", get(system_name).put(update_system_name))
        .route("/system-config/system-info", get(system_info))
        .route("/system-config/key/{key}", get(config_by_key))
        .route(
            "/system-config/{id}",
            get(get_config).put(update_config).delete(delete_config),
        )
        .route("/platform/api", get(all_interfaces))
        .route("/product-api-relations", get(product_interfaces).post(assign_interfaces))
        .route("/statistics/order/operator", get(operator_statistics))
        .route("/external-api-keys", post(create_api_key))
        .route("/external-api-keys/my", get(my_api_key))
        .route("/external-api-keys/{id}/regenerate", post(regenerate_api_key))
        .route("/external-api-keys/{id}/status", put(update_api_key_status))
        .route_layer(middleware::from_fn_with_state(db.clone(), require_auth));

    Router::new()
        .nest("/api/v1", open.merge(protected))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_auth(State(db): State<Db>, request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);
    let valid = match token {
        Some(token) => db.read().await.tokens.contains(&token),
        None => false,
    };
    if !valid {
        tracing::debug!(path = %request.uri().path(), "rejected request without a valid token");
        return (StatusCode::UNAUTHORIZED, fail(401, "未登录或登录已过期")).into_response();
    }
    next.run(request).await
}

#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

async fn login(State(db): State<Db>, Json(input): Json<Credentials>) -> Json<Value> {
    if input.username != ADMIN_USERNAME || input.password != ADMIN_PASSWORD {
        return fail(400, "用户名或密码错误");
    }
    let token = Uuid::new_v4().simple().to_string();
    db.write().await.tokens.push(token.clone());
    tracing::info!(username = %input.username, "issued admin token");
    ok(json!({ "token": token }))
}

async fn logout(State(db): State<Db>, request: Request) -> Json<Value> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default()
        .to_string();
    db.write().await.tokens.retain(|t| *t != token);
    ok(Value::Null)
}

async fn public_system_name(State(db): State<Db>) -> Json<Value> {
    ok(json!({ "system_name": db.read().await.system_name() }))
}

async fn public_basic_info(State(db): State<Db>) -> Json<Value> {
    ok(json!({ "system_name": db.read().await.system_name(), "system_logo": "" }))
}

#[derive(Deserialize)]
pub struct BalanceChange {
    pub user_id: i64,
    pub amount: f64,
    #[serde(default)]
    pub style: Option<i32>,
    #[serde(default)]
    pub remark: String,
}

async fn recharge(State(db): State<Db>, Json(input): Json<BalanceChange>) -> Json<Value> {
    adjust_balance(&db, input, 1).await
}

async fn deduct(State(db): State<Db>, Json(input): Json<BalanceChange>) -> Json<Value> {
    adjust_balance(&db, input, 2).await
}

/// `kind` 1 credits the balance, 2 debits it.
async fn adjust_balance(db: &Db, input: BalanceChange, kind: i32) -> Json<Value> {
    if input.amount <= 0.0 {
        return fail(400, "金额必须大于0");
    }
    let mut store = db.write().await;
    let id = store.next_id();
    let Some(user) = store.users.get_mut(&input.user_id) else {
        return fail(404, "用户不存在");
    };
    let before = user.balance;
    if kind == 2 && before < input.amount {
        return fail(400, "余额不足");
    }
    user.balance = if kind == 1 { before + input.amount } else { before - input.amount };
    let log = BalanceLog {
        id,
        user_id: input.user_id,
        amount: input.amount,
        kind,
        style: input.style.unwrap_or(if kind == 1 { 4 } else { 3 }),
        balance: user.balance,
        balance_before: before,
        remark: input.remark,
    };
    store.balance_logs.push(log);
    ok(json!({ "id": id }))
}

#[derive(Deserialize)]
pub struct LogParams {
    pub user_id: Option<i64>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

async fn balance_logs(State(db): State<Db>, Query(params): Query<LogParams>) -> Json<Value> {
    let store = db.read().await;
    let matching: Vec<&BalanceLog> = store
        .balance_logs
        .iter()
        .filter(|l| params.user_id.is_none_or(|id| l.user_id == id))
        .collect();
    let (list, total) = paginate(&matching, params.page, params.page_size);
    ok(json!({ "list": list, "total": total }))
}

#[derive(Deserialize)]
pub struct UserParams {
    pub current: Option<usize>,
    pub size: Option<usize>,
    pub phone: Option<String>,
}

async fn list_users(State(db): State<Db>, Query(params): Query<UserParams>) -> Json<Value> {
    let store = db.read().await;
    let matching: Vec<&User> = store
        .users
        .values()
        .filter(|u| params.phone.as_deref().is_none_or(|p| u.phone.contains(p)))
        .collect();
    let (records, total) = paginate(&matching, params.current, params.size);
    ok(json!({
        "records": records,
        "total": total,
        "current": params.current.unwrap_or(1),
        "size": params.size.unwrap_or(10),
    }))
}

#[derive(Deserialize)]
pub struct CreditInput {
    pub user_id: i64,
    #[serde(rename = "creditLimit")]
    pub credit_limit: f64,
}

async fn set_credit(State(db): State<Db>, Json(input): Json<CreditInput>) -> Json<Value> {
    let mut store = db.write().await;
    match store.users.get_mut(&input.user_id) {
        Some(user) => {
            user.credit_limit = input.credit_limit;
            ok(Value::Null)
        }
        None => fail(404, "用户不存在"),
    }
}

#[derive(Deserialize)]
pub struct ConfigParams {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub config_key: Option<String>,
}

async fn list_configs(State(db): State<Db>, Query(params): Query<ConfigParams>) -> Json<Value> {
    let store = db.read().await;
    let matching: Vec<&SystemConfig> = store
        .configs
        .values()
        .filter(|c| params.config_key.as_deref().is_none_or(|k| c.config_key.contains(k)))
        .collect();
    let (list, total) = paginate(&matching, params.page, params.page_size);
    ok(json!({ "list": list, "total": total }))
}

#[derive(Deserialize)]
pub struct ConfigInput {
    pub config_key: Option<String>,
    pub config_value: String,
    #[serde(default)]
    pub config_desc: Option<String>,
    #[serde(default)]
    pub config_type: Option<String>,
}

async fn create_config(State(db): State<Db>, Json(input): Json<ConfigInput>) -> Json<Value> {
    let Some(key) = input.config_key.filter(|k| !k.is_empty()) else {
        return fail(400, "无效的参数");
    };
    let mut store = db.write().await;
    if store.configs.values().any(|c| c.config_key == key) {
        return fail(400, "配置键已存在");
    }
    let id = store.next_id();
    store.configs.insert(
        id,
        SystemConfig {
            id,
            config_key: key,
            config_value: input.config_value,
            config_desc: input.config_desc.unwrap_or_default(),
            config_type: input.config_type.unwrap_or_else(|| "string".to_string()),
            status: 1,
        },
    );
    ok(Value::Null)
}

async fn get_config(State(db): State<Db>, Path(id): Path<i64>) -> Json<Value> {
    match db.read().await.configs.get(&id) {
        Some(config) => ok(config),
        None => fail(404, "配置不存在"),
    }
}

async fn config_by_key(State(db): State<Db>, Path(key): Path<String>) -> Json<Value> {
    match db.read().await.configs.values().find(|c| c.config_key == key) {
        Some(config) => ok(config),
        None => fail(404, "配置不存在"),
    }
}

async fn update_config(State(db): State<Db>, Path(id): Path<i64>, Json(input): Json<ConfigInput>) -> Json<Value> {
    let mut store = db.write().await;
    let Some(config) = store.configs.get_mut(&id) else {
        return fail(404, "配置不存在");
    };
    config.config_value = input.config_value;
    if let Some(desc) = input.config_desc {
        config.config_desc = desc;
    }
    if let Some(kind) = input.config_type {
        config.config_type = kind;
    }
    ok(Value::Null)
}

async fn delete_config(State(db): State<Db>, Path(id): Path<i64>) -> Json<Value> {
    match db.write().await.configs.remove(&id) {
        Some(_) => ok(Value::Null),
        None => fail(404, "配置不存在"),
    }
}

async fn batch_update_configs(State(db): State<Db>, Json(values): Json<HashMap<String, String>>) -> Json<Value> {
    if values.is_empty() {
        return fail(400, "配置不能为空");
    }
    let mut store = db.write().await;
    for config in store.configs.values_mut() {
        if let Some(value) = values.get(&config.config_key) {
            config.config_value = value.clone();
        }
    }
    ok(Value::Null)
}

async fn system_name(State(db): State<Db>) -> Json<Value> {
    ok(json!({ "system_name": db.read().await.system_name() }))
}

async fn system_info(State(db): State<Db>) -> Json<Value> {
    let store = db.read().await;
    let configs: BTreeMap<&str, &str> = store
        .configs
        .values()
        .map(|c| (c.config_key.as_str(), c.config_value.as_str()))
        .collect();
    ok(json!({
        "configs": configs,
        "system_info": {
            "version": env!("CARGO_PKG_VERSION"),
            "user_count": store.users.len(),
        },
    }))
}

#[derive(Deserialize)]
pub struct SystemNameInput {
    pub system_name: String,
}

async fn update_system_name(State(db): State<Db>, Json(input): Json<SystemNameInput>) -> Json<Value> {
    if input.system_name.trim().is_empty() {
        return fail(400, "无效的参数");
    }
    let mut store = db.write().await;
    match store.configs.values_mut().find(|c| c.config_key == "system_name") {
        Some(config) => config.config_value = input.system_name,
        None => {
            let id = store.next_id();
            store.configs.insert(
                id,
                SystemConfig {
                    id,
                    config_key: "system_name".to_string(),
                    config_value: input.system_name,
                    config_desc: String::new(),
                    config_type: "string".to_string(),
                    status: 1,
                },
            );
        }
    }
    ok(Value::Null)
}

#[derive(Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub product_id: Option<i64>,
}

async fn all_interfaces(State(db): State<Db>, Query(params): Query<PageParams>) -> Json<Value> {
    let store = db.read().await;
    let all: Vec<&ApiInterface> = store.interfaces.iter().collect();
    let (list, total) = paginate(&all, params.page, params.page_size);
    ok(json!({ "list": list, "total": total }))
}

async fn product_interfaces(State(db): State<Db>, Query(params): Query<PageParams>) -> Json<Value> {
    let store = db.read().await;
    let Some(ids) = params.product_id.and_then(|id| store.relations.get(&id)) else {
        return fail(500, "商品不存在");
    };
    let assigned: Vec<&ApiInterface> = store.interfaces.iter().filter(|i| ids.contains(&i.id)).collect();
    let (list, total) = paginate(&assigned, params.page, params.page_size);
    ok(json!({ "list": list, "total": total }))
}

#[derive(Deserialize)]
pub struct AssignInput {
    pub product_id: i64,
    pub interface_ids: Vec<i64>,
}

async fn assign_interfaces(State(db): State<Db>, Json(input): Json<AssignInput>) -> Json<Value> {
    let mut store = db.write().await;
    if !store.relations.contains_key(&input.product_id) {
        return fail(500, "商品不存在");
    }
    if let Some(missing) = input
        .interface_ids
        .iter()
        .find(|id| !store.interfaces.iter().any(|i| i.id == **id))
    {
        return fail(400, &format!("接口 {missing} 不存在"));
    }
    store.relations.insert(input.product_id, input.interface_ids);
    ok(Value::Null)
}

async fn operator_statistics() -> Json<Value> {
    ok(json!([
        {"isp": 1, "totalOrders": 120},
        {"isp": 2, "totalOrders": 45},
        {"isp": 3, "totalOrders": 30},
    ]))
}

#[derive(Deserialize, Default)]
pub struct KeyInput {
    pub app_name: Option<String>,
    pub description: Option<String>,
}

fn issue_key(id: i64, app_name: String, description: String) -> ApiKey {
    ApiKey {
        id,
        app_id: format!("app_{}", &Uuid::new_v4().simple().to_string()[..12]),
        app_key: Uuid::new_v4().simple().to_string(),
        app_secret: Uuid::new_v4().simple().to_string(),
        app_name,
        description,
        status: 1,
        rate_limit: 1000,
    }
}

async fn create_api_key(State(db): State<Db>, Json(input): Json<KeyInput>) -> Json<Value> {
    let mut store = db.write().await;
    if store.api_key.is_some() {
        return fail(400, "已存在API密钥");
    }
    let id = store.next_id();
    let key = issue_key(
        id,
        input.app_name.unwrap_or_default(),
        input.description.unwrap_or_default(),
    );
    store.api_key = Some(key.clone());
    ok(key)
}

async fn my_api_key(State(db): State<Db>) -> Json<Value> {
    ok(db.read().await.api_key.clone())
}

async fn regenerate_api_key(State(db): State<Db>, Path(id): Path<i64>) -> Json<Value> {
    let mut store = db.write().await;
    match store.api_key.as_ref().filter(|k| k.id == id) {
        Some(old) => {
            let mut key = issue_key(id, old.app_name.clone(), old.description.clone());
            key.app_id = old.app_id.clone();
            store.api_key = Some(key.clone());
            ok(key)
        }
        None => fail(404, "API密钥不存在"),
    }
}

#[derive(Deserialize)]
pub struct StatusInput {
    pub status: i32,
}

async fn update_api_key_status(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<StatusInput>,
) -> Json<Value> {
    if input.status != 0 && input.status != 1 {
        return fail(400, "无效的状态");
    }
    let mut store = db.write().await;
    match store.api_key.as_mut().filter(|k| k.id == id) {
        Some(key) => {
            key.status = input.status;
            ok(key.clone())
        }
        None => fail(404, "API密钥不存在"),
    }
}

/// Slice one 1-based page out of `items`, returning it with the total.
fn paginate<T: Clone>(items: &[T], page: Option<usize>, page_size: Option<usize>) -> (Vec<T>, usize) {
    let page = page.unwrap_or(1).max(1);
    let size = page_size.unwrap_or(10).max(1);
    let rows = items.iter().skip((page - 1).saturating_mul(size)).take(size).cloned().collect();
    (rows, items.len())
}
