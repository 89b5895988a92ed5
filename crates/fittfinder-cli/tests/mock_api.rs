//! CLI tests against a mock API.
//!
//! The CLI binary runs as a child process pointed at a wiremock server.

mod common;

use std::process::Output;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{TEST_TOKEN, mock_env, run_cli_with_env, stderr, stdout};

async fn start_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"loginId": "alice", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": TEST_TOKEN})))
        .expect(1)
        .mount(&server)
        .await;
    server
}

/// Run the CLI off the async runtime so the mock server keeps serving.
async fn run(server: &MockServer, args: &[&str]) -> Output {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let env = mock_env(&server.uri());
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let env: Vec<(&str, &str)> = env.iter().map(|(k, v)| (*k, v.as_str())).collect();
        run_cli_with_env(&args, &env)
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whoami() {
    let server = start_server().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .and(body_json(json!({"query": "query { self { id name effectivePermissions } }"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"self": {
                "id": "u1",
                "name": "Alice",
                "effectivePermissions": ["SEARCH_EVENTS", "CREATE_EVENT"]
            }}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(&server, &["whoami"]).await;
    assert!(output.status.success(), "whoami failed: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("u1"));
    assert!(out.contains("Alice"));
    assert!(out.contains("SEARCH_EVENTS, CREATE_EVENT"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_events() {
    let server = start_server().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_json(json!({
            "query": "query EventInstances($query: String) { eventInstances(query: $query) { nodes { id startDate event { name } } } }",
            "operationName": "EventInstances",
            "variables": {"query": "yoga"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"eventInstances": {"nodes": [
                {"id": "ei1", "startDate": "2022-01-03T18:00:00Z", "event": {"name": "Morning Yoga"}},
                {"id": "ei2", "startDate": "2022-01-05T18:00:00Z", "event": {"name": "Evening Yoga"}}
            ]}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(&server, &["search-events", "yoga"]).await;
    assert!(output.status.success(), "search failed: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("ei1: Morning Yoga @ 2022-01-03T18:00:00Z"));
    assert!(out.contains("ei2: Evening Yoga @ 2022-01-05T18:00:00Z"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_query_with_variables() {
    let server = start_server().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_json(json!({
            "query": "query Event($id: ID!) { event(id: $id) { name } }",
            "operationName": "Event",
            "variables": {"id": "e1"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"event": {"name": "My MWF Workout"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(
        &server,
        &[
            "query",
            "query Event($id: ID!) { event(id: $id) { name } }",
            "--operation-name",
            "Event",
            "--variables",
            r#"{"id": "e1"}"#,
        ],
    )
    .await;
    assert!(output.status.success(), "query failed: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), r#"{"event":{"name":"My MWF Workout"}}"#);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_event_from_file() {
    let server = start_server().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_json(json!({
            "query": "mutation CreateEvent($private: Boolean!, $name: String!, $formatId: ID!, $firstStart: DateTime!) { createEvent(input: { private: $private, name: $name, formatId: $formatId, firstStart: $firstStart }) { event { id } } }",
            "operationName": "CreateEvent",
            "variables": {
                "private": false,
                "name": "My MWF Workout",
                "formatId": "class",
                "firstStart": "2022-01-03T18:00:00Z"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"createEvent": {"event": {"id": "e42"}}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("event.json");
    std::fs::write(
        &file,
        r#"{"private": false, "name": "My MWF Workout", "formatId": "class", "firstStart": "2022-01-03T18:00:00Z"}"#,
    )
    .unwrap();

    let output = run(&server, &["create-event", file.to_str().unwrap()]).await;
    assert!(output.status.success(), "create failed: {}", stderr(&output));
    assert!(stdout(&output).contains("e42"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_missing_event() {
    let server = start_server().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{
                "message": "Event not found",
                "extensions": {"exception": {"code": "NOT_FOUND"}}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(&server, &["delete-event", "e404"]).await;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Event e404 not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_event() {
    let server = start_server().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"deleteEvent": {"deleted": true}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(&server, &["delete-event", "e42"]).await;
    assert!(output.status.success(), "delete failed: {}", stderr(&output));
    assert!(stdout(&output).contains("Event deleted"));
}
