use std::collections::VecDeque;
use std::sync::Arc;

use aacnews_api_types::{ColumnGroup, Payload};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use super::*;
use crate::credentials::{Credential, StaticCredential};
use crate::transport::{ApiResponse, TransportError};

#[derive(Default)]
struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
    replies: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
}

impl RecordingTransport {
    async fn reply(&self, status: StatusCode, body: &str) {
        self.replies.lock().await.push_back(Ok(ApiResponse {
            status,
            body: Bytes::copy_from_slice(body.as_bytes()),
        }));
    }

    async fn fail(&self, message: &str) {
        self.replies
            .lock()
            .await
            .push_back(Err(TransportError::connection(message)));
    }

    async fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().await.clone()
    }

    async fn last(&self) -> ApiRequest {
        self.requests
            .lock()
            .await
            .last()
            .cloned()
            .expect("at least one request")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        tokio::task::yield_now().await;
        self.requests.lock().await.push(request);
        self.replies.lock().await.pop_front().unwrap_or(Ok(ApiResponse {
            status: StatusCode::OK,
            body: Bytes::from_static(b"{}"),
        }))
    }
}

/// Provider whose token can change between calls, like a session that logs in.
#[derive(Default)]
struct SwappableCredential(std::sync::Mutex<Option<Credential>>);

impl SwappableCredential {
    fn set(&self, token: &str) {
        *self.0.lock().expect("credential lock") = Credential::new(token);
    }
}

impl CredentialProvider for SwappableCredential {
    fn credential(&self) -> Option<Credential> {
        self.0.lock().expect("credential lock").clone()
    }
}

fn client_with(transport: &Arc<RecordingTransport>, token: Option<&str>) -> AdminClient {
    let credentials = token.map_or_else(StaticCredential::anonymous, StaticCredential::new);
    AdminClient::new(transport.clone(), Arc::new(credentials))
}

fn payload(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn token_of(request: &ApiRequest) -> Option<&str> {
    request
        .headers
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn save_with_identifier_updates_item() -> Result<(), AdminError> {
    let transport = Arc::new(RecordingTransport::default());
    let client = client_with(&transport, Some("tok"));

    for (resource, path) in [
        (Resource::Type, "types/5"),
        (Resource::Post, "posts/5"),
        (Resource::Newsletter, "newsletters/5"),
    ] {
        let body = payload(json!({"id": 5, "name": "n"}));
        client.save(resource, &body).await?;
        let request = transport.last().await;
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path, path);
        assert_eq!(request.body, Some(Value::Object(body)));
    }
    Ok(())
}

#[tokio::test]
async fn save_without_identifier_creates_in_collection() -> Result<(), AdminError> {
    let transport = Arc::new(RecordingTransport::default());
    let client = client_with(&transport, None);

    client.save_type(&payload(json!({"name": "Videos"}))).await?;
    client.save_post(&payload(json!({"id": 0, "title": "t"}))).await?;
    client.save_newsletter(&payload(json!({"id": "", "title": "n"}))).await?;

    let seen: Vec<(Method, String)> = transport
        .requests()
        .await
        .into_iter()
        .map(|r| (r.method, r.path))
        .collect();
    assert_eq!(
        seen,
        vec![
            (Method::POST, "types".to_owned()),
            (Method::POST, "posts".to_owned()),
            (Method::POST, "newsletters".to_owned()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn reads_and_deletes_hit_expected_paths() -> Result<(), AdminError> {
    let transport = Arc::new(RecordingTransport::default());
    let client = client_with(&transport, Some("tok"));

    client.get_types().await?;
    client.get_type(1_u64).await?;
    client.remove_type("1").await?;
    client.get_posts().await?;
    client.get_posts_published().await?;
    client.get_post(9_u64).await?;
    client.remove_post(9_u64).await?;
    client.get_newsletters().await?;
    client.get_newsletter(3_u64).await?;
    client.remove_newsletter(3_u64).await?;
    client.get_history_post("42").await?;
    client.get_history_post_by_version("42", "3").await?;
    client.get_template().await?;

    let seen: Vec<(Method, String)> = transport
        .requests()
        .await
        .into_iter()
        .map(|r| (r.method, r.path))
        .collect();
    let expected = [
        (Method::GET, "types"),
        (Method::GET, "types/1"),
        (Method::DELETE, "types/1"),
        (Method::GET, "posts"),
        (Method::GET, "posts/published"),
        (Method::GET, "posts/9"),
        (Method::DELETE, "posts/9"),
        (Method::GET, "newsletters"),
        (Method::GET, "newsletters/3"),
        (Method::DELETE, "newsletters/3"),
        (Method::GET, "posts/history/42"),
        (Method::GET, "posts/history/42/3"),
        (Method::GET, "template"),
    ]
    .map(|(m, p)| (m, p.to_owned()));
    assert_eq!(seen, expected.to_vec());
    Ok(())
}

#[tokio::test]
async fn identifiers_are_escaped_into_one_segment() -> Result<(), AdminError> {
    let transport = Arc::new(RecordingTransport::default());
    let client = client_with(&transport, Some("tok"));

    client.remove_type("../newsletters/3").await?;
    client.get_type("a?b").await?;
    client.get_newsletter("x#y").await?;
    client.get_history_post_by_version("4/5", "1 2").await?;
    client
        .save_type(&payload(json!({"id": "a/b", "name": "Videos"})))
        .await?;

    let seen: Vec<(Method, String)> = transport
        .requests()
        .await
        .into_iter()
        .map(|r| (r.method, r.path))
        .collect();
    let expected = [
        (Method::DELETE, "types/..%2Fnewsletters%2F3"),
        (Method::GET, "types/a%3Fb"),
        (Method::GET, "newsletters/x%23y"),
        (Method::GET, "posts/history/4%2F5/1%202"),
        (Method::PUT, "types/a%2Fb"),
    ]
    .map(|(m, p)| (m, p.to_owned()));
    assert_eq!(seen, expected.to_vec());
    Ok(())
}

#[tokio::test]
async fn dot_identifiers_are_refused_before_sending() {
    let transport = Arc::new(RecordingTransport::default());
    let client = client_with(&transport, Some("tok"));

    for id in [".", ".."] {
        let err = client.remove_type(id).await.expect_err("dot segment");
        assert!(matches!(err, AdminError::InvalidIdentifier(ref raw) if raw == id));
    }
    let err = client
        .get_history_post_by_version("42", "..")
        .await
        .expect_err("dot version");
    assert!(matches!(err, AdminError::InvalidIdentifier(_)));
    assert!(transport.requests().await.is_empty());
}

#[tokio::test]
async fn every_call_carries_the_current_token() -> Result<(), AdminError> {
    let transport = Arc::new(RecordingTransport::default());
    let client = client_with(&transport, Some("secret"));

    client.get_posts().await?;
    client.save_post(&payload(json!({"title": "t"}))).await?;
    client.send_newsletter("<p>hi</p>", "Issue 1").await?;
    client.add_post_diigo(&[]).await?;

    for request in transport.requests().await {
        assert_eq!(token_of(&request), Some("secret"), "path {}", request.path);
        assert!(request.headers[ACCESS_TOKEN_HEADER].is_sensitive());
    }
    Ok(())
}

#[tokio::test]
async fn anonymous_calls_omit_token_header() -> Result<(), AdminError> {
    let transport = Arc::new(RecordingTransport::default());
    let client = client_with(&transport, None);

    client.get_types().await?;
    client.remove_newsletter(2_u64).await?;

    for request in transport.requests().await {
        assert!(request.headers.get(ACCESS_TOKEN_HEADER).is_none());
    }
    Ok(())
}

#[tokio::test]
async fn credential_is_read_on_every_call() -> Result<(), AdminError> {
    let transport = Arc::new(RecordingTransport::default());
    let credentials = Arc::new(SwappableCredential::default());
    let client = AdminClient::new(transport.clone(), credentials.clone());

    client.get_types().await?;
    credentials.set("after-login");
    client.get_types().await?;

    let requests = transport.requests().await;
    assert_eq!(token_of(&requests[0]), None);
    assert_eq!(token_of(&requests[1]), Some("after-login"));
    Ok(())
}

#[tokio::test]
async fn repeated_reads_issue_identical_requests() -> Result<(), AdminError> {
    let transport = Arc::new(RecordingTransport::default());
    let client = client_with(&transport, Some("tok"));

    client.get_post(4_u64).await?;
    client.get_post(4_u64).await?;

    let requests = transport.requests().await;
    assert_eq!(requests[0].method, requests[1].method);
    assert_eq!(requests[0].path, requests[1].path);
    assert_eq!(requests[0].headers, requests[1].headers);
    Ok(())
}

#[tokio::test]
async fn send_scopes_content_type_to_its_own_request() -> Result<(), AdminError> {
    let transport = Arc::new(RecordingTransport::default());
    let client = client_with(&transport, Some("tok"));

    let (sent, listed) = tokio::join!(
        client.send_newsletter("<h1>News</h1>", "March"),
        client.get_posts()
    );
    sent?;
    listed?;

    let requests = transport.requests().await;
    let send = requests.iter().find(|r| r.path == "send").expect("send request");
    let list = requests.iter().find(|r| r.path == "posts").expect("list request");

    assert_eq!(send.method, Method::POST);
    assert_eq!(send.headers[CONTENT_TYPE], "text/html");
    assert_eq!(
        send.body,
        Some(json!({"html": "<h1>News</h1>", "title": "March"}))
    );
    assert!(list.headers.get(CONTENT_TYPE).is_none());
    Ok(())
}

#[tokio::test]
async fn success_body_is_returned_verbatim() -> Result<(), AdminError> {
    let transport = Arc::new(RecordingTransport::default());
    transport
        .reply(StatusCode::OK, r#"[{"id":1,"name":"Videos"}]"#)
        .await;
    transport
        .reply(StatusCode::OK, "<html><body>{{title}}</body></html>")
        .await;
    transport.reply(StatusCode::NO_CONTENT, "").await;
    let client = client_with(&transport, None);

    assert_eq!(
        client.get_types().await?,
        json!([{"id": 1, "name": "Videos"}])
    );
    assert_eq!(
        client.get_template().await?,
        json!("<html><body>{{title}}</body></html>")
    );
    assert_eq!(client.remove_type(1_u64).await?, Value::Null);
    Ok(())
}

#[tokio::test]
async fn server_rejection_keeps_status_and_body() {
    let transport = Arc::new(RecordingTransport::default());
    transport
        .reply(StatusCode::UNAUTHORIZED, r#"{"message":"bad token"}"#)
        .await;
    let client = client_with(&transport, Some("expired"));

    let err = client
        .save_type(&payload(json!({"id": 2, "name": "x"})))
        .await
        .expect_err("rejected");
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    match err {
        AdminError::Server { body, .. } => assert_eq!(body, json!({"message": "bad token"})),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn transport_failure_is_passed_through() {
    let transport = Arc::new(RecordingTransport::default());
    transport.fail("connection refused").await;
    let client = client_with(&transport, None);

    let err = client.get_posts().await.expect_err("offline");
    assert!(matches!(
        err,
        AdminError::Transport(TransportError::Connection(ref msg)) if msg == "connection refused"
    ));
}

#[tokio::test]
async fn invalid_token_is_rejected_before_sending() {
    let transport = Arc::new(RecordingTransport::default());
    let client = client_with(&transport, Some("line\nbreak"));

    let err = client.get_posts().await.expect_err("invalid header");
    assert!(matches!(err, AdminError::InvalidCredential));
    assert!(transport.requests().await.is_empty());
}

#[tokio::test]
async fn history_entries_decode_versions() -> Result<(), AdminError> {
    let transport = Arc::new(RecordingTransport::default());
    transport
        .reply(
            StatusCode::OK,
            r#"[{"version":1,"title":"draft"},{"version":2,"title":"final"}]"#,
        )
        .await;
    let client = client_with(&transport, None);

    let entries = client.history_entries("42").await?;
    let versions: Vec<Value> = entries.iter().map(|e| e.version.clone()).collect();
    assert_eq!(versions, vec![json!(1), json!(2)]);
    assert_eq!(entries[1].post.get("title"), Some(&json!("final")));
    Ok(())
}

fn sample_groups() -> Vec<ColumnGroup> {
    serde_json::from_value(json!([
        {"id": 1, "name": "A", "columns": [[{"title": "p1"}], [{"title": "p2"}]]},
        {"id": 2, "name": "B", "columns": [[], [{"title": "p3"}, {"title": "p4"}]]}
    ]))
    .expect("decode groups")
}

#[test]
fn flatten_tags_posts_with_their_group() {
    let flat = flatten_columns(&sample_groups()[..1]);
    let flat: Vec<Value> = flat.into_iter().map(Value::Object).collect();
    assert_eq!(
        flat,
        vec![
            json!({"title": "p1", "type": {"id": 1, "name": "A"}}),
            json!({"title": "p2", "type": {"id": 1, "name": "A"}}),
        ]
    );
}

#[test]
fn flatten_keeps_explicit_null_type_fields() {
    let groups: Vec<ColumnGroup> = serde_json::from_value(json!([
        {"id": null, "name": "Untyped", "columns": [[{"title": "p1"}]]},
        {"name": "NoId", "columns": [[{"title": "p2"}]]}
    ]))
    .expect("decode groups");
    let types: Vec<Value> = flatten_columns(&groups)
        .into_iter()
        .map(|p| p["type"].clone())
        .collect();
    assert_eq!(
        types,
        vec![json!({"id": null, "name": "Untyped"}), json!({"name": "NoId"})]
    );
}

#[test]
fn flatten_preserves_order_across_groups() {
    let titles: Vec<Value> = flatten_columns(&sample_groups())
        .into_iter()
        .map(|p| p["title"].clone())
        .collect();
    assert_eq!(
        titles,
        vec![json!("p1"), json!("p2"), json!("p3"), json!("p4")]
    );
}

#[test]
fn flatten_does_not_mutate_input() {
    let groups = sample_groups();
    let _ = flatten_columns(&groups);
    assert!(!groups[0].columns[0][0].contains_key("type"));
}

#[tokio::test]
async fn diigo_cross_post_sends_flattened_posts() -> Result<(), AdminError> {
    let transport = Arc::new(RecordingTransport::default());
    transport.reply(StatusCode::OK, r#"{"saved":4}"#).await;
    let client = client_with(&transport, Some("tok"));

    let body = client.add_post_diigo(&sample_groups()).await?;
    assert_eq!(body, json!({"saved": 4}));

    let request = transport.last().await;
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "diigo/posts");
    let posts = request
        .body
        .as_ref()
        .and_then(|b| b["posts"].as_array())
        .expect("posts array");
    assert_eq!(posts.len(), 4);
    assert_eq!(posts[3]["type"], json!({"id": 2, "name": "B"}));
    Ok(())
}

#[tokio::test]
async fn disabled_slack_cross_post_settles_without_request() -> Result<(), AdminError> {
    let transport = Arc::new(RecordingTransport::default());
    let client = client_with(&transport, Some("tok"));

    let outcome = tokio::time::timeout(
        std::time::Duration::from_secs(1),
        client.add_post_slack(&sample_groups()),
    )
    .await
    .expect("disabled cross-post must settle")?;

    assert_eq!(outcome, CrossPostOutcome::Disabled { flattened: 4 });
    assert!(transport.requests().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn enabled_slack_cross_post_publishes() -> Result<(), AdminError> {
    let transport = Arc::new(RecordingTransport::default());
    transport.reply(StatusCode::OK, r#"{"ok":true}"#).await;
    let client = client_with(&transport, Some("tok")).with_cross_post(CrossPostSettings {
        slack_enabled: true,
    });

    let outcome = client.add_post_slack(&sample_groups()).await?;
    assert_eq!(outcome, CrossPostOutcome::Published(json!({"ok": true})));
    assert_eq!(transport.last().await.path, "slack/posts");
    Ok(())
}
