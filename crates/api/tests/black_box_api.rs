use std::sync::Arc;

use reqwest::StatusCode;
use restock_api::app::services::{AppServices, ListService};
use restock_chat::CommandParser;
use restock_infra::MemoryListRepository;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, in-memory repository, ephemeral port.
        let services = Arc::new(AppServices {
            lists: ListService::new(Arc::new(MemoryListRepository::new())),
            parser: CommandParser::new(),
        });
        let app = restock_api::app::build_app(services);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create_list(client: &reqwest::Client, base_url: &str) -> String {
    let res = client
        .post(format!("{}/item-lists", base_url))
        .json(&json!({
            "name": "Groceries",
            "description": "weekly run",
            "creator_id": uuid::Uuid::now_v7(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert!(res.headers().contains_key("location"));

    let body: serde_json::Value = res.json().await.unwrap();
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn list_crud_round_trip() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = create_list(&client, &srv.base_url).await;

    // Read it back.
    let res = client
        .get(format!("{}/item-lists/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["name"], "Groceries");
    assert_eq!(body["items"].as_array().unwrap().len(), 0);

    // Rename.
    let res = client
        .patch(format!("{}/item-lists/{}", srv.base_url, id))
        .json(&json!({ "name": "Pantry" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["name"], "Pantry");

    // Delete, then the list is gone.
    let res = client
        .delete(format!("{}/item-lists/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/item-lists/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn item_lifecycle_and_status_filter() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = create_list(&client, &srv.base_url).await;

    // Add a batch; unspecified status defaults to "unknown".
    let res = client
        .post(format!("{}/item-lists/{}/items", srv.base_url, id))
        .json(&json!({ "items": [
            { "name": "milk" },
            { "name": "eggs", "status": "ok" },
        ]}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let added: serde_json::Value = res.json().await.unwrap();
    assert_eq!(added[0]["status"], "unknown");

    // Set milk to out.
    let res = client
        .patch(format!("{}/item-lists/{}/items/milk", srv.base_url, id))
        .json(&json!({ "status": "out" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Filter by status.
    let res = client
        .get(format!(
            "{}/item-lists/{}/items?statuses=out,low",
            srv.base_url, id
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let items: serde_json::Value = res.json().await.unwrap();
    let names: Vec<&str> = items
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["milk"]);

    // Single-item delete.
    let res = client
        .delete(format!("{}/item-lists/{}/items/milk", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .delete(format!("{}/item-lists/{}/items/milk", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_add_batch_is_rejected_whole() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = create_list(&client, &srv.base_url).await;

    let res = client
        .post(format!("{}/item-lists/{}/items", srv.base_url, id))
        .json(&json!({ "items": [{ "name": "milk" }] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/item-lists/{}/items", srv.base_url, id))
        .json(&json!({ "items": [{ "name": "eggs" }, { "name": "milk" }] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "duplicate_name");

    // "eggs" must not have landed.
    let res = client
        .get(format!("{}/item-lists/{}/items", srv.base_url, id))
        .send()
        .await
        .unwrap();
    let items: serde_json::Value = res.json().await.unwrap();
    assert_eq!(items.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn batch_status_update_is_all_or_nothing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = create_list(&client, &srv.base_url).await;

    client
        .post(format!("{}/item-lists/{}/items", srv.base_url, id))
        .json(&json!({ "items": [{ "name": "milk", "status": "ok" }] }))
        .send()
        .await
        .unwrap();

    let res = client
        .patch(format!("{}/item-lists/{}/items", srv.base_url, id))
        .json(&json!({ "changes": [
            { "name": "milk", "status": "out" },
            { "name": "ghost", "status": "out" },
        ]}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // milk's status is untouched.
    let res = client
        .get(format!("{}/item-lists/{}/items/milk", srv.base_url, id))
        .send()
        .await
        .unwrap();
    let item: serde_json::Value = res.json().await.unwrap();
    assert_eq!(item["status"], "ok");
}

#[tokio::test]
async fn chat_drives_the_same_list_operations() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let id = create_list(&client, &srv.base_url).await;

    let chat = |message: &str| {
        let client = client.clone();
        let url = format!("{}/item-lists/{}/chat", srv.base_url, id);
        let message = message.to_string();
        async move {
            client
                .post(url)
                .json(&json!({ "message": message }))
                .send()
                .await
                .unwrap()
        }
    };

    let res = chat("Add milk, eggs, butter").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["reply"], "Added items: milk, eggs, butter");

    let res = chat("Out of milk").await;
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["reply"], "Updated items: milk");

    let res = chat("Show out items").await;
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["reply"], "Out items: milk");

    let res = chat("Remove milk, cheese").await;
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["reply"], "Removed items: milk");

    let res = chat("Show items").await;
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["reply"], "All items: eggs, butter");

    // Whitespace-only input is "no command", a 422 rather than a 4xx lookup failure.
    let res = chat("   ").await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
