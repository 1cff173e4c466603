use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

/// Exchange metadata served from `/exchanges/{exchange}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeInfo {
    pub name: String,
    pub supported: bool,
    pub required_permissions: Vec<String>,
    pub assets: Vec<String>,
}

pub const STRATEGIES: &[&str] = &["DEMA", "MACD", "PPO", "RSI", "StochRSI", "CCI", "TSI", "UO"];

pub fn exchanges() -> Vec<ExchangeInfo> {
    fn entry(name: &str, supported: bool, assets: &[&str]) -> ExchangeInfo {
        ExchangeInfo {
            name: name.to_string(),
            supported,
            required_permissions: vec!["trade".to_string(), "balance".to_string()],
            assets: assets.iter().map(|a| a.to_string()).collect(),
        }
    }
    vec![
        entry("Binance", true, &["BTC", "ETH", "USDT", "BNB"]),
        entry("Kraken", true, &["BTC", "ETH", "EUR", "USD"]),
        entry("Bitfinex", true, &["BTC", "ETH", "USD"]),
        entry("Poloniex", false, &["BTC", "ETH", "USDT"]),
    ]
}

/// Running trading sessions keyed by id, holding the config each was started with.
pub type Sessions = Arc<RwLock<HashMap<String, Map<String, Value>>>>;

pub fn app() -> Router {
    let sessions: Sessions = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/exchanges/{exchange}", get(get_exchange))
        .route("/strategies", get(list_strategies))
        .route("/trade", post(start_trade))
        .route("/trade/{id}", delete(stop_trade))
        .with_state(sessions)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

async fn get_exchange(Path(exchange): Path<String>) -> Result<Json<ExchangeInfo>, ApiError> {
    exchanges()
        .into_iter()
        .find(|e| e.name == exchange)
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("unknown exchange: {exchange}")))
}

async fn list_strategies() -> Json<Value> {
    Json(json!({ "strategies": STRATEGIES }))
}

async fn start_trade(
    State(sessions): State<Sessions>,
    Json(config): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if config.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "empty trading configuration"));
    }
    if let Some(exchange) = config.get("exchange") {
        let known = exchange
            .as_str()
            .is_some_and(|name| exchanges().iter().any(|e| e.name == name));
        if !known {
            return Err(api_error(StatusCode::BAD_REQUEST, format!("unknown exchange: {exchange}")));
        }
    }
    if let Some(strategy) = config.get("strategy") {
        let known = strategy.as_str().is_some_and(|name| STRATEGIES.contains(&name));
        if !known {
            return Err(api_error(StatusCode::BAD_REQUEST, format!("unknown strategy: {strategy}")));
        }
    }

    let id = format!("trade_{}", Uuid::new_v4().simple());
    sessions.write().await.insert(id.clone(), config);
    info!(session_id = %id, "trading session started");
    Ok((StatusCode::CREATED, Json(json!({ "sessionId": id }))))
}

async fn stop_trade(
    State(sessions): State<Sessions>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    match sessions.write().await.remove(&id) {
        Some(config) => {
            info!(session_id = %id, "trading session stopped");
            Ok(Json(json!({ "sessionId": id, "stopped": true, "config": config })))
        }
        None => Err(api_error(StatusCode::NOT_FOUND, format!("unknown session: {id}"))),
    }
}
