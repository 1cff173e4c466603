//! Blocking client for the Gekko trading platform API.
//!
//! # Overview
//! Four operations against a Gekko server: fetch exchange metadata, list
//! strategies, start a trading session, stop a trading session. Payloads are
//! passed through as raw JSON objects.
//!
//! # Design
//! - `GekkoClient` holds only `base_url` and a `Transport`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response); the executing method runs both through
//!   the transport, `UreqTransport` by default.
//! - Failures collapse into `GekkoError::Validation` or `GekkoError::Runtime`
//!   with the cause in the message. `stop_trading` reports failure as `false`.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::{GekkoClient, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{GekkoError, HttpError};
pub use http::{requote_url, HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use types::{JsonObject, TradingConfig};
