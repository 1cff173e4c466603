//! Blocking client for the Gekko trading API.
//!
//! # Design
//! `GekkoClient` holds a `base_url` and a `Transport`, and nothing else.
//! Every operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`; the
//! executing method glues the two together through the transport. Callers
//! that run their own HTTP stack can use the build/parse halves directly and
//! get identical error mapping.
//!
//! Path segments (`exchange`, `session_id`) are interpolated as given. The
//! transport percent-encodes whatever is not legal in a URI on the way out
//! (see `requote_url`), so `a/b` still spans two path segments.

use tracing::{debug, warn};

use crate::error::{GekkoError, HttpError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::types::{JsonObject, TradingConfig};

/// Base URL used by `GekkoClient::default`.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Environment variable read by `GekkoClient::from_env`.
pub const BASE_URL_ENV: &str = "GEKKO_API_URL";

/// Client for the four Gekko endpoints.
#[derive(Debug, Clone)]
pub struct GekkoClient<T = UreqTransport> {
    base_url: String,
    transport: T,
}

impl GekkoClient {
    /// Client over the default blocking transport. `base_url` is kept
    /// verbatim, trailing slash included.
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }

    /// Client whose base URL comes from `GEKKO_API_URL`, or
    /// `DEFAULT_BASE_URL` when unset or empty.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.is_empty() => Self::new(&url),
            _ => Self::default(),
        }
    }
}

impl Default for GekkoClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl<T> GekkoClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get_exchange_info(&self, exchange: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/exchanges/{exchange}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_list_strategies(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/strategies", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Rejects an empty configuration before anything is sent.
    pub fn build_start_trading(&self, config: &TradingConfig) -> Result<HttpRequest, GekkoError> {
        if config.is_empty() {
            return Err(GekkoError::Validation(
                "Trading configuration cannot be empty".to_string(),
            ));
        }
        let body = serde_json::to_string(config)
            .map_err(|e| GekkoError::Validation(format!("Failed to start trading: {e}")))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/trade", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_stop_trading(&self, session_id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/trade/{session_id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_get_exchange_info(&self, response: HttpResponse) -> Result<JsonObject, GekkoError> {
        decode_object(response).map_err(exchange_info_failed)
    }

    pub fn parse_list_strategies(&self, response: HttpResponse) -> Result<JsonObject, GekkoError> {
        decode_object(response).map_err(list_strategies_failed)
    }

    /// Returns the `sessionId` string, or `None` when the field is missing
    /// or not a string.
    pub fn parse_start_trading(&self, response: HttpResponse) -> Result<Option<String>, GekkoError> {
        let body = decode_object(response).map_err(start_trading_failed)?;
        match body.get("sessionId") {
            Some(serde_json::Value::String(id)) => Ok(Some(id.clone())),
            Some(other) => {
                warn!(session_id = %other, "start trading response sessionId is not a string");
                Ok(None)
            }
            None => {
                debug!("start trading response carried no sessionId");
                Ok(None)
            }
        }
    }

    /// Only an exact 200 counts as stopped.
    pub fn parse_stop_trading(&self, response: HttpResponse) -> bool {
        response.status == 200
    }
}

impl<T: Transport> GekkoClient<T> {
    /// Fetch metadata for one exchange. Fails with `GekkoError::Validation`.
    pub fn get_exchange_info(&self, exchange: &str) -> Result<JsonObject, GekkoError> {
        let request = self.build_get_exchange_info(exchange);
        let response = self.transport.execute(request).map_err(exchange_info_failed)?;
        self.parse_get_exchange_info(response)
    }

    /// List the strategies the server supports. Fails with
    /// `GekkoError::Runtime`.
    pub fn list_strategies(&self) -> Result<JsonObject, GekkoError> {
        let request = self.build_list_strategies();
        let response = self.transport.execute(request).map_err(list_strategies_failed)?;
        self.parse_list_strategies(response)
    }

    /// Start a trading session and return its id. Fails with
    /// `GekkoError::Validation`.
    pub fn start_trading(&self, config: &TradingConfig) -> Result<Option<String>, GekkoError> {
        let request = self.build_start_trading(config)?;
        let response = self.transport.execute(request).map_err(start_trading_failed)?;
        self.parse_start_trading(response)
    }

    /// Stop a trading session. Never fails: any transport error is reported
    /// as `false`.
    pub fn stop_trading(&self, session_id: &str) -> bool {
        match self.transport.execute(self.build_stop_trading(session_id)) {
            Ok(response) => {
                let stopped = self.parse_stop_trading(response);
                if !stopped {
                    warn!(session_id, "trading session was not stopped");
                }
                stopped
            }
            Err(e) => {
                warn!(session_id, error = %e, "stop trading request failed");
                false
            }
        }
    }
}

/// Require a 2xx status and a JSON object body.
fn decode_object(response: HttpResponse) -> Result<JsonObject, HttpError> {
    if !response.is_success() {
        return Err(HttpError::Status {
            status: response.status,
            body: response.body,
        });
    }
    serde_json::from_str(&response.body).map_err(|e| HttpError::Decode(e.to_string()))
}

fn exchange_info_failed(cause: HttpError) -> GekkoError {
    warn!(error = %cause, "exchange info request failed");
    GekkoError::Validation(format!("Failed to retrieve exchange info: {cause}"))
}

fn list_strategies_failed(cause: HttpError) -> GekkoError {
    warn!(error = %cause, "strategy listing failed");
    GekkoError::Runtime(format!("Failed to list strategies: {cause}"))
}

fn start_trading_failed(cause: HttpError) -> GekkoError {
    warn!(error = %cause, "start trading request failed");
    GekkoError::Validation(format!("Failed to start trading: {cause}"))
}
