//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected outcomes. Request bodies are compared as parsed JSON so field
//! ordering does not matter.

use gekko_core::{GekkoClient, GekkoError, HttpMethod, HttpRequest, HttpResponse, JsonObject};
use serde::de::DeserializeOwned;
use serde::Deserialize;

const BASE_URL: &str = "http://localhost:3000";

#[derive(Deserialize)]
struct Vectors<I, R> {
    cases: Vec<Case<I, R>>,
}

#[derive(Deserialize)]
struct Case<I, R> {
    name: String,
    input: I,
    expected_request: Option<ExpectedRequest>,
    simulated_response: Option<SimulatedResponse>,
    expected: Outcome<R>,
}

#[derive(Deserialize)]
struct ExpectedRequest {
    method: String,
    path: String,
    headers: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct SimulatedResponse {
    status: u16,
    body: String,
}

impl SimulatedResponse {
    fn to_response(&self) -> HttpResponse {
        HttpResponse {
            status: self.status,
            headers: Vec::new(),
            body: self.body.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum Outcome<R> {
    Ok(R),
    Error { kind: ErrorKind, message: String },
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum ErrorKind {
    Validation,
    Runtime,
}

impl<R: std::fmt::Debug + PartialEq> Outcome<R> {
    fn check(&self, name: &str, actual: Result<R, GekkoError>) {
        match (self, actual) {
            (Outcome::Ok(expected), Ok(actual)) => assert_eq!(&actual, expected, "{name}: result"),
            (Outcome::Error { kind, message }, Err(err)) => {
                let expected = match kind {
                    ErrorKind::Validation => GekkoError::Validation(message.clone()),
                    ErrorKind::Runtime => GekkoError::Runtime(message.clone()),
                };
                assert_eq!(err, expected, "{name}: error");
            }
            (_, actual) => panic!("{name}: unexpected outcome {actual:?}"),
        }
    }
}

fn load<I: DeserializeOwned, R: DeserializeOwned>(raw: &str) -> Vec<Case<I, R>> {
    serde_json::from_str::<Vectors<I, R>>(raw).unwrap().cases
}

fn client() -> GekkoClient {
    GekkoClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &ExpectedRequest) {
    assert_eq!(req.method, parse_method(&expected.method), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected.path), "{name}: url");
    assert_eq!(req.headers, expected.headers, "{name}: headers");
    let body: Option<serde_json::Value> = req
        .body
        .as_deref()
        .map(|b| serde_json::from_str(b).unwrap());
    assert_eq!(body, expected.body, "{name}: body");
}

// ---------------------------------------------------------------------------
// Exchange info
// ---------------------------------------------------------------------------

#[test]
fn exchange_info_test_vectors() {
    let c = client();
    for case in load::<String, JsonObject>(include_str!("../../test-vectors/exchange_info.json")) {
        let name = &case.name;
        let req = c.build_get_exchange_info(&case.input);
        assert_request(name, &req, case.expected_request.as_ref().unwrap());

        let response = case.simulated_response.as_ref().unwrap().to_response();
        case.expected.check(name, c.parse_get_exchange_info(response));
    }
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

#[test]
fn strategies_test_vectors() {
    let c = client();
    for case in load::<(), JsonObject>(include_str!("../../test-vectors/strategies.json")) {
        let name = &case.name;
        let req = c.build_list_strategies();
        assert_request(name, &req, case.expected_request.as_ref().unwrap());

        let response = case.simulated_response.as_ref().unwrap().to_response();
        case.expected.check(name, c.parse_list_strategies(response));
    }
}

// ---------------------------------------------------------------------------
// Start trading
// ---------------------------------------------------------------------------

#[test]
fn start_trading_test_vectors() {
    let c = client();
    let cases =
        load::<JsonObject, Option<String>>(include_str!("../../test-vectors/start_trading.json"));
    for case in cases {
        let name = &case.name;
        let built = c.build_start_trading(&case.input);

        let Some(expected_req) = &case.expected_request else {
            // Rejected before a request exists.
            case.expected.check(name, built.map(|_| None));
            continue;
        };
        let req = built.unwrap();
        assert_request(name, &req, expected_req);

        let response = case.simulated_response.as_ref().unwrap().to_response();
        case.expected.check(name, c.parse_start_trading(response));
    }
}

// ---------------------------------------------------------------------------
// Stop trading
// ---------------------------------------------------------------------------

#[test]
fn stop_trading_test_vectors() {
    let c = client();
    for case in load::<String, bool>(include_str!("../../test-vectors/stop_trading.json")) {
        let name = &case.name;
        let req = c.build_stop_trading(&case.input);
        assert_request(name, &req, case.expected_request.as_ref().unwrap());

        let response = case.simulated_response.as_ref().unwrap().to_response();
        case.expected.check(name, Ok(c.parse_stop_trading(response)));
    }
}
