use nebula::{ProjectStore, SaveResponse};
use serde_json::json;

use super::common;

#[tokio::test]
async fn save_demo_then_load_round_trips() {
    let server = common::spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/save"))
        .json(&json!({
            "name": "demo",
            "positive_prompt": "a cat",
            "negative_prompt": "blurry",
            "vars": [{"key": "seed", "type": "int", "value": "42"}],
        }))
        .send()
        .await
        .unwrap();
    let (status, body) = common::json_of(resp).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"ok": true, "name": "demo.json"}));

    let written: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(server.root().join("demo.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(
        written["variables"][0],
        json!({"key": "seed", "type": "int", "value": "42", "typedValue": 42})
    );

    let resp = client.get(server.url("/load?name=demo")).send().await.unwrap();
    let (status, body) = common::json_of(resp).await;
    assert_eq!(status, 200);
    assert_eq!(body["positive_prompt"], json!("a cat"));
    assert_eq!(body["negative_prompt"], json!("blurry"));
    assert_eq!(body["vars"][0], json!({"key": "seed", "type": "int", "value": "42"}));
    server.stop().await;
}

#[tokio::test]
async fn save_keeps_key_whitespace_and_normalizes_type() {
    let server = common::spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/save"))
        .json(&json!({
            "name": "spaced",
            "vars": [{"key": " seed ", "type": " FLOAT ", "value": "x"}],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let written: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(server.root().join("spaced.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(
        written["variables"][0],
        json!({"key": " seed ", "type": "float", "value": "x", "typedValue": 0.0})
    );
    server.stop().await;
}

#[tokio::test]
async fn save_with_unparsable_body_is_400() {
    let server = common::spawn_server().await;
    let client = reqwest::Client::new();

    for body in ["not valid json", "[\"demo\"]"] {
        let resp = client
            .post(server.url("/save"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap();
        let (status, value) = common::json_of(resp).await;
        assert_eq!(status, 400, "body {}", body);
        assert_eq!(value, json!({"error": "Invalid JSON body"}));
    }
    server.stop().await;
}

#[tokio::test]
async fn save_with_blank_name_is_400() {
    let server = common::spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/save"))
        .json(&json!({"name": "   ", "positive_prompt": "x"}))
        .send()
        .await
        .unwrap();
    let (status, body) = common::json_of(resp).await;

    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "Project name is required"}));
    server.stop().await;
}

#[tokio::test]
async fn save_sanitizes_traversal_names() {
    let server = common::spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/save"))
        .json(&json!({"name": "../../outside"}))
        .send()
        .await
        .unwrap();
    let (status, body) = common::json_of(resp).await;

    assert_eq!(status, 200);
    assert_eq!(body["name"], json!("____outside.json"));
    assert!(server.root().join("____outside.json").is_file());
    assert!(!server.base().join("outside.json").exists());
    server.stop().await;
}

#[tokio::test]
async fn save_write_failure_is_500() {
    let server = common::spawn_server().await;
    // A directory squatting on the target name makes the final rename fail.
    std::fs::create_dir_all(server.root().join("blocked.json").join("inner")).unwrap();

    let resp = reqwest::Client::new()
        .post(server.url("/save"))
        .json(&json!({"name": "blocked"}))
        .send()
        .await
        .unwrap();
    let (status, body) = common::json_of(resp).await;

    assert_eq!(status, 500);
    assert!(body["error"]
        .as_str()
        .unwrap_or_default()
        .starts_with("Failed to write JSON"));
    assert!(common::stray_files(server.root()).is_empty());
    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_saves_of_one_name_all_succeed() {
    let server = common::spawn_server().await;
    let client = reqwest::Client::new();

    let mut tasks = Vec::new();
    for i in 0..32 {
        let client = client.clone();
        let url = server.url("/save");
        tasks.push(tokio::spawn(async move {
            let resp = client
                .post(url)
                .json(&json!({"name": "race", "positive_prompt": format!("take {}", i)}))
                .send()
                .await
                .unwrap();
            common::typed_of::<SaveResponse>(resp).await
        }));
    }
    for task in tasks {
        let (status, body) = task.await.unwrap();
        assert_eq!(status, 200);
        assert_eq!(body, SaveResponse { ok: true, name: "race.json".into() });
    }

    let doc = server.store.load("race").await.unwrap();
    assert!(doc.positive_prompt.starts_with("take "));
    assert!(common::stray_files(server.root()).is_empty());
    server.stop().await;
}
