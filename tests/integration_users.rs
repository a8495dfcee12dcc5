use reqwest::StatusCode;
use serde_json::Value;

mod common;

#[tokio::test]
async fn test_list_users() {
    let app = common::TestApp::spawn().await;
    let run_id = common::run_id();
    let alice = app.register_user(&format!("alice_{run_id}")).await;
    let bob = app.register_user(&format!("bob_{run_id}")).await;

    let resp = app.get("/users", Some(&alice.token)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    let users = body["users"].as_array().unwrap();
    let bob_entry = users.iter().find(|u| u["username"] == bob.username.as_str()).expect("bob listed");
    assert_eq!(bob_entry["first_name"], "Test");
    assert_eq!(bob_entry["phone"], "555-0100");
    assert!(bob_entry.get("password_hash").is_none());
    assert!(bob_entry.get("last_login_at").is_none());
}

#[tokio::test]
async fn test_profile_is_self_only() {
    let app = common::TestApp::spawn().await;
    let run_id = common::run_id();
    let alice = app.register_user(&format!("alice_{run_id}")).await;
    let bob = app.register_user(&format!("bob_{run_id}")).await;

    let resp = app.get(&format!("/users/{}", bob.username), Some(&alice.token)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app.get(&format!("/users/{}", alice.username), Some(&alice.token)).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_mailboxes_are_self_only() {
    let app = common::TestApp::spawn().await;
    let run_id = common::run_id();
    let alice = app.register_user(&format!("alice_{run_id}")).await;
    let bob = app.register_user(&format!("bob_{run_id}")).await;

    for suffix in ["to", "from"] {
        let resp = app.get(&format!("/users/{}/{suffix}", bob.username), Some(&alice.token)).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "/{suffix}");

        let resp = app.get(&format!("/users/{}/{suffix}", bob.username), None).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "/{suffix} without token");
    }
}

#[tokio::test]
async fn test_messages_to_and_from() {
    let app = common::TestApp::spawn().await;
    let run_id = common::run_id();
    let alice = app.register_user(&format!("alice_{run_id}")).await;
    let bob = app.register_user(&format!("bob_{run_id}")).await;

    let first = app.send_message(&alice, &bob, "first").await;
    let second = app.send_message(&alice, &bob, "second").await;

    let resp = app.get(&format!("/users/{}/to", bob.username), Some(&bob.token)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    let inbox = body["messages"].as_array().unwrap();
    assert_eq!(inbox.len(), 2);
    assert_eq!(inbox[0]["id"], first);
    assert_eq!(inbox[1]["id"], second);
    assert_eq!(inbox[0]["body"], "first");
    assert!(inbox[0]["read_at"].is_null());
    assert_eq!(inbox[0]["from_user"]["username"], alice.username.as_str());
    assert!(inbox[0].get("to_user").is_none());

    let resp = app.get(&format!("/users/{}/from", alice.username), Some(&alice.token)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    let outbox = body["messages"].as_array().unwrap();
    assert_eq!(outbox.len(), 2);
    assert_eq!(outbox[1]["body"], "second");
    assert_eq!(outbox[1]["to_user"]["username"], bob.username.as_str());
    assert!(outbox[1].get("from_user").is_none());

    let resp = app.get(&format!("/users/{}/to", alice.username), Some(&alice.token)).await;
    let body: Value = resp.json().await.unwrap();
    assert!(body["messages"].as_array().unwrap().is_empty());
}
