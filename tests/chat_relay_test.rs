mod common;

use common::{TEST_MODEL, TestApp};
use reqwest::Client;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn chat_relay_returns_the_model_reply() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/{}:generateContent", TEST_MODEL)))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                {
                    "content": {
                        "role": "model",
                        "parts": [{ "text": "Olá! Como posso ajudar?" }]
                    }
                }
            ]
        })))
        .expect(1)
        .mount(&app.gemini_server)
        .await;

    let client = Client::new();
    let response = client
        .post(format!("{}/chat-relay", app.address))
        .json(&json!({ "message": "Quais são os horários de atendimento?" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["reply"], "Olá! Como posso ajudar?");
}

#[tokio::test]
async fn chat_relay_forwards_message_and_context_in_the_prompt() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/{}:generateContent", TEST_MODEL)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "ok" }] } }
            ]
        })))
        .mount(&app.gemini_server)
        .await;

    let client = Client::new();
    client
        .post(format!("{}/chat-relay", app.address))
        .json(&json!({
            "message": "Qual o endereço?",
            "context": "Paciente já cadastrado"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let requests = app.gemini_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Qual o endereço?"));
    assert!(prompt.contains("Paciente já cadastrado"));
}

#[tokio::test]
async fn empty_message_is_rejected() {
    let app = TestApp::spawn().await;

    let client = Client::new();
    let response = client
        .post(format!("{}/chat-relay", app.address))
        .json(&json!({ "message": "" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 422);

    let requests = app.gemini_server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn model_failure_surfaces_as_a_provider_error() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/{}:generateContent", TEST_MODEL)))
        .respond_with(ResponseTemplate::new(503).set_body_string("model overloaded"))
        .mount(&app.gemini_server)
        .await;

    let client = Client::new();
    let response = client
        .post(format!("{}/chat-relay", app.address))
        .json(&json!({ "message": "oi" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(
        body["error"].as_str().unwrap().contains("model overloaded")
    );
}
