//! Integration tests for the chat widget REST API.
//!
//! Each test spins up an Axum server on a random port and drives the real
//! HTTP contract with reqwest.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tokio::net::TcpListener;

use abroad_assist::config::ChatConfig;
use abroad_assist::dialogue::DialogueEngine;
use abroad_assist::routes::chat_app;
use abroad_assist::session::SessionStore;

/// Start an Axum server on a random port, return (base url, store).
async fn start_server() -> (String, Arc<SessionStore>) {
    let store = SessionStore::new(DialogueEngine::new(ChatConfig::default().without_delays()));
    let app = chat_app(Arc::clone(&store));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (format!("http://127.0.0.1:{port}"), store)
}

async fn open(client: &reqwest::Client, base: &str, body: Value) -> Value {
    let resp = client
        .post(format!("{base}/api/chat/sessions"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    resp.json().await.unwrap()
}

async fn say(client: &reqwest::Client, base: &str, id: &str, text: &str) -> Value {
    let resp = client
        .post(format!("{base}/api/chat/sessions/{id}/messages"))
        .json(&json!({ "text": text }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}

fn reply_texts(report: &Value) -> Vec<String> {
    report["replies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["message"]["text"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn destination_typed_first_returns_card_without_advancing() {
    let (base, _) = start_server().await;
    let client = reqwest::Client::new();

    let opened = open(&client, &base, json!({})).await;
    let id = opened["session_id"].as_str().unwrap().to_string();

    let report = say(&client, &base, &id, "USA").await;
    assert_eq!(report["step"], 0);

    let all = reply_texts(&report).join("\n");
    assert!(all.contains("4,000+"));
    assert!(all.contains("$30,000-60,000 per year"));
    assert!(all.contains("Highlights"));
}

#[tokio::test]
async fn happy_path_ends_in_summary_with_three_options() {
    let (base, _) = start_server().await;
    let client = reqwest::Client::new();

    let opened = open(&client, &base, json!({})).await;
    let id = opened["session_id"].as_str().unwrap().to_string();

    let answers = [
        "Asha",
        "asha@mail.in",
        "Bachelor's Degree",
        "Canada",
        "Computer Science & IT",
        "₹10-20 Lakhs",
        "Next year",
    ];
    let mut last = Value::Null;
    for answer in answers {
        last = say(&client, &base, &id, answer).await;
    }

    assert_eq!(last["step"], 7);
    assert_eq!(last["phase"], "summarized");

    let replies = last["replies"].as_array().unwrap();
    let summary = replies.last().unwrap();
    let text = summary["message"]["text"].as_str().unwrap();
    for answer in answers {
        assert!(text.contains(answer), "summary is missing {answer}");
    }
    assert_eq!(
        summary["message"]["quick_replies"].as_array().unwrap().len(),
        3
    );
}

#[tokio::test]
async fn closing_word_closes_and_reset_reopens() {
    let (base, _) = start_server().await;
    let client = reqwest::Client::new();

    let opened = open(&client, &base, json!({})).await;
    let id = opened["session_id"].as_str().unwrap().to_string();

    let report = say(&client, &base, &id, "ok bye").await;
    assert_eq!(report["phase"], "closed");
    assert_eq!(report["replies"].as_array().unwrap().len(), 1);
    assert_eq!(report["actions"][0]["type"], "close_widget");

    let ignored = say(&client, &base, &id, "hello?").await;
    assert!(ignored["replies"].as_array().unwrap().is_empty());

    let resp = client
        .post(format!("{base}/api/chat/sessions/{id}/reset"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let reset: Value = resp.json().await.unwrap();
    assert_eq!(reset["phase"], "greeting");
    assert_eq!(reset["step"], 0);
}

#[tokio::test]
async fn returning_visitor_gets_a_different_greeting() {
    let (base, _) = start_server().await;
    let client = reqwest::Client::new();

    let first = open(&client, &base, json!({})).await;
    let stale = chrono::Utc::now() - chrono::Duration::days(30);
    let returning = open(&client, &base, json!({ "last_visit": stale })).await;

    assert_ne!(reply_texts(&first), reply_texts(&returning));
    assert!(returning["last_visit"].is_string());
}

#[tokio::test]
async fn session_state_and_delete() {
    let (base, store) = start_server().await;
    let client = reqwest::Client::new();

    let opened = open(&client, &base, json!({})).await;
    let id = opened["session_id"].as_str().unwrap().to_string();
    say(&client, &base, &id, "Asha").await;

    let resp = client
        .get(format!("{base}/api/chat/sessions/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let state: Value = resp.json().await.unwrap();
    assert_eq!(state["profile"]["name"], "Asha");
    assert_eq!(state["step"], 1);

    let resp = client
        .delete(format!("{base}/api/chat/sessions/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);
    assert_eq!(store.len().await, 0);

    let resp = client
        .get(format!("{base}/api/chat/sessions/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("not found"));
}
