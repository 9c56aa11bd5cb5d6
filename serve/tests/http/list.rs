use nebula::ListResponse;
use serde_json::json;

use super::common;

#[tokio::test]
async fn list_on_empty_store_returns_no_files() {
    let server = common::spawn_server().await;

    let resp = reqwest::get(server.url("/list")).await.unwrap();
    let (status, body) = common::json_of(resp).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"files": []}));
    server.stop().await;
}

#[tokio::test]
async fn list_returns_saved_projects_sorted() {
    let server = common::spawn_server().await;
    std::fs::create_dir_all(server.root()).unwrap();
    for name in ["zeta.json", "Alpha.json", "readme.md"] {
        std::fs::write(server.root().join(name), "{}").unwrap();
    }

    let resp = reqwest::get(server.url("/list")).await.unwrap();
    let (status, body): (u16, ListResponse) = common::typed_of(resp).await;

    assert_eq!(status, 200);
    assert_eq!(body.files, vec!["Alpha.json", "zeta.json"]);
    server.stop().await;
}
