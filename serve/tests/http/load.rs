use nebula::{ErrorResponse, LoadResponse, ProjectStore, VarType, VariableSlot};
use serde_json::json;

use super::common;

#[tokio::test]
async fn load_missing_project_is_404() {
    let server = common::spawn_server().await;

    let resp = reqwest::get(server.url("/load?name=missing")).await.unwrap();
    let (status, body): (u16, ErrorResponse) = common::typed_of(resp).await;

    assert_eq!(status, 404);
    assert_eq!(body.error, "Not found");
    server.stop().await;
}

#[tokio::test]
async fn load_without_name_is_400() {
    let server = common::spawn_server().await;

    for path in ["/load", "/load?name=", "/load?name=%20%20"] {
        let resp = reqwest::get(server.url(path)).await.unwrap();
        let (status, body) = common::json_of(resp).await;
        assert_eq!(status, 400, "path {}", path);
        assert_eq!(body, json!({"error": "Missing name"}));
    }
    server.stop().await;
}

#[tokio::test]
async fn load_malformed_file_is_500() {
    let server = common::spawn_server().await;
    std::fs::create_dir_all(server.root()).unwrap();
    std::fs::write(server.root().join("broken.json"), "{ nope").unwrap();

    let resp = reqwest::get(server.url("/load?name=broken")).await.unwrap();
    let (status, body) = common::json_of(resp).await;

    assert_eq!(status, 500);
    assert!(body["error"]
        .as_str()
        .unwrap_or_default()
        .starts_with("Failed to read JSON"));
    server.stop().await;
}

#[tokio::test]
async fn load_returns_normalized_view_of_legacy_file() {
    let server = common::spawn_server().await;
    std::fs::create_dir_all(server.root()).unwrap();
    std::fs::write(
        server.root().join("old.json"),
        json!({
            "prompt": "legacy positive",
            "variables": [{"key": "w", "type": "Weird", "value": 3, "typedValue": "ignored"}],
        })
        .to_string(),
    )
    .unwrap();

    let resp = reqwest::get(server.url("/load?name=old")).await.unwrap();
    let (status, body) = common::json_of(resp).await;

    assert_eq!(status, 200);
    assert_eq!(body["name"], json!("old.json"));
    assert_eq!(body["positive_prompt"], json!("legacy positive"));
    assert_eq!(body["negative_prompt"], json!(""));
    let vars = body["vars"].as_array().unwrap();
    assert_eq!(vars.len(), 5);
    assert_eq!(vars[0], json!({"key": "w", "type": "string", "value": "3"}));
    assert_eq!(vars[4], json!({"key": "", "type": "string", "value": ""}));
    server.stop().await;
}

#[tokio::test]
async fn load_with_repeated_name_uses_first() {
    let server = common::spawn_server().await;
    server.store.save("first", "p1", "n1", &[]).await.unwrap();

    let resp = reqwest::get(server.url("/load?name=first&name=second"))
        .await
        .unwrap();
    let (status, body): (u16, LoadResponse) = common::typed_of(resp).await;

    assert_eq!(status, 200);
    assert_eq!(body.name, "first.json");
    assert_eq!(body.positive_prompt, "p1");
    assert_eq!(body.vars.len(), 5);
    assert_eq!(
        body.vars[0],
        VariableSlot {
            key: String::new(),
            ty: VarType::String,
            value: String::new(),
        }
    );
    server.stop().await;
}

#[tokio::test]
async fn load_with_undecodable_query_still_answers_json() {
    let server = common::spawn_server().await;

    let resp = reqwest::get(server.url("/load?name=%FF%FE&other"))
        .await
        .unwrap();
    let (status, body): (u16, ErrorResponse) = common::typed_of(resp).await;

    assert_eq!(status, 404);
    assert_eq!(body.error, "Not found");
    server.stop().await;
}
