//! Verify every endpoint against JSON test vectors stored in `test-vectors/`.
//!
//! Each case names an operation, the request it must produce, a simulated
//! response, and either the decoded result or the expected error kind. The
//! simulated response is replayed through a transport that records the
//! request, so the whole build, dispatch and decode path is exercised.
//! Results are compared as typed values, not raw strings.

use std::sync::Mutex;

use friends_core::{
    ApiError, Credentials, Friend, FriendsService, FriendsSummary, HttpMethod, HttpRequest,
    HttpResponse, SuggestedFriend, Transport,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

/// Replays one simulated response and keeps the request that produced it.
struct Replay {
    response: HttpResponse,
    seen: Mutex<Vec<HttpRequest>>,
}

impl Transport for Replay {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.seen.lock().unwrap().push(request);
        Ok(self.response.clone())
    }
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn replay_service(case: &Value) -> FriendsService<Replay> {
    let sim = &case["simulated_response"];
    let response = HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    );
    FriendsService::with_transport(
        BASE_URL,
        Replay {
            response,
            seen: Mutex::new(Vec::new()),
        },
    )
}

fn check_request(name: &str, service: &FriendsService<Replay>, expected: &Value) {
    let seen = service.gateway().transport().seen.lock().unwrap();
    assert_eq!(seen.len(), 1, "{name}: exactly one request");
    let req = &seen[0];
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");
    assert_eq!(req.header("authorization"), Some("Bearer tok"), "{name}: bearer");
    if let Some(body) = expected.get("body") {
        assert_eq!(req.body.as_deref(), body.as_str(), "{name}: body");
    }
}

fn check_error(name: &str, err: ApiError, expected: &Value) {
    match expected["kind"].as_str().unwrap() {
        "Status" => {
            let status = expected["status"].as_u64().unwrap() as u16;
            assert_eq!(err.status(), Some(status), "{name}: expected status {status}, got {err:?}");
        }
        "Decode" => assert!(matches!(err, ApiError::Decode(_)), "{name}: expected Decode, got {err:?}"),
        other => panic!("{name}: unknown expected_error kind: {other}"),
    }
}

fn check_outcome<T>(name: &str, case: &Value, result: Result<T, ApiError>)
where
    T: serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    match case.get("expected_error") {
        Some(expected) => check_error(name, result.unwrap_err(), expected),
        None => {
            let expected: T = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: decoded result");
        }
    }
}

// ---------------------------------------------------------------------------
// Payload endpoints
// ---------------------------------------------------------------------------

#[test]
fn fetch_test_vectors() {
    let raw = include_str!("../../test-vectors/fetch.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let me = Credentials::new("me", "tok");

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let friend_id = case["friend_id"].as_str().unwrap_or_default();
        let service = replay_service(case);

        match case["operation"].as_str().unwrap() {
            "fetch_friend" => check_outcome::<Friend>(name, case, service.fetch_friend(&me, friend_id)),
            "fetch_friends" => check_outcome::<Vec<Friend>>(name, case, service.fetch_friends(&me)),
            "fetch_friends_incoming" => {
                check_outcome::<Vec<Friend>>(name, case, service.fetch_friends_incoming(&me))
            }
            "fetch_friends_outgoing" => {
                check_outcome::<Vec<Friend>>(name, case, service.fetch_friends_outgoing(&me))
            }
            "fetch_friends_suggested" => {
                check_outcome::<Vec<SuggestedFriend>>(name, case, service.fetch_friends_suggested(&me))
            }
            "fetch_friends_summary" => {
                check_outcome::<FriendsSummary>(name, case, service.fetch_friends_summary(&me))
            }
            other => panic!("{name}: unknown operation {other}"),
        }
        check_request(name, &service, &case["expected_request"]);
    }
}

// ---------------------------------------------------------------------------
// Status-only endpoints
// ---------------------------------------------------------------------------

#[test]
fn mutate_test_vectors() {
    let raw = include_str!("../../test-vectors/mutate.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let me = Credentials::new("me", "tok");

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let friend_id = case["friend_id"].as_str().unwrap_or_default();
        let service = replay_service(case);

        let result = match case["operation"].as_str().unwrap() {
            "add_friend" => service.add_friend(&me, friend_id),
            "remove_friend" => service.remove_friend(&me, friend_id),
            "remove_friends_bulk" => service.remove_friends_bulk(&me),
            "set_friend_nickname" => {
                service.set_friend_nickname(&me, friend_id, case["nickname"].as_str().unwrap())
            }
            "remove_friend_nickname" => service.remove_friend_nickname(&me, friend_id),
            other => panic!("{name}: unknown operation {other}"),
        };

        match case.get("expected_error") {
            Some(expected) => check_error(name, result.unwrap_err(), expected),
            None => assert!(result.is_ok(), "{name}: expected success, got {result:?}"),
        }
        check_request(name, &service, &case["expected_request"]);
    }
}
