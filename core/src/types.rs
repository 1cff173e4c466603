//! Payload types for the Gekko API.
//!
//! The server's exchange, strategy and trade payloads are passed through
//! untouched, so they are modelled as raw JSON objects rather than DTOs.

/// A JSON object as returned by the server or supplied by the caller.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Caller-supplied trading configuration posted to `/trade`. Must hold at
/// least one key.
pub type TradingConfig = JsonObject;
