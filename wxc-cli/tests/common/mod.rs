//! wiremock helpers for exercising commands against a fake Webex API.

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wxc::client::WebexClient;

pub const TOKEN: &str = "mock-test-token";

/// Start a mock server and a client pointed at it.
pub async fn setup() -> (MockServer, WebexClient) {
    let server = MockServer::start().await;
    let client = WebexClient::new(&server.uri(), TOKEN).unwrap();
    (server, client)
}

pub fn number_json(workspace_id: &str, name: &str, extension: Option<&str>, did: Option<&str>) -> Value {
    let mut number = json!({
        "state": "ACTIVE",
        "owner": {"id": workspace_id, "type": "PLACE", "firstName": name},
    });
    if let Some(extension) = extension {
        number["extension"] = json!(extension);
    }
    if let Some(did) = did {
        number["phoneNumber"] = json!(did);
    }
    number
}

pub fn caller_id_json(selected: &str, name_policy: &str) -> Value {
    json!({
        "selected": selected,
        "directNumber": "+15550000001",
        "locationNumber": "+15550000002",
        "customNumber": "+15550000003",
        "externalCallerIdNamePolicy": name_policy,
        "displayName": "Lobby Phone",
        "locationExternalCallerIdName": "Main Office",
        "customExternalCallerIdName": "Front Desk",
    })
}

pub async fn mock_numbers_by_extension(server: &MockServer, extension: &str, numbers: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/telephony/config/numbers"))
        .and(query_param("extension", extension))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "phoneNumbers": numbers })))
        .mount(server)
        .await;
}

pub async fn mock_caller_id(server: &MockServer, workspace_id: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/workspaces/{}/features/callerId", workspace_id)))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mock_location(server: &MockServer, name: &str, locations: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/locations"))
        .and(query_param("name", name))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": locations })))
        .mount(server)
        .await;
}

pub async fn mock_workspaces_named(server: &MockServer, display_name: &str, workspaces: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/workspaces"))
        .and(query_param("displayName", display_name))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": workspaces })))
        .mount(server)
        .await;
}
