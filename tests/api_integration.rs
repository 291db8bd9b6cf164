use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

use tag_taxonomy::routes::create_router;
use tag_taxonomy::{MemoryStore, Taxonomy};

// Test client wrapper for making API calls
struct TestClient {
    client: Client,
    base_url: String,
}

impl TestClient {
    async fn post(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(&format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }

    async fn put(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .put(&format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }

    async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .get(&format!("{}{}", self.base_url, path))
            .send()
            .await
    }

    async fn delete(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .delete(&format!("{}{}", self.base_url, path))
            .send()
            .await
    }

    async fn patch(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .patch(&format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }
}

/// Serve a fresh store on an ephemeral port
async fn spawn_server(taxonomy: Taxonomy) -> TestClient {
    let store = Arc::new(MemoryStore::new(taxonomy));
    let app = create_router().with_state(store);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestClient {
        client: Client::new(),
        base_url: format!("http://{}", addr),
    }
}

async fn create_tag(client: &TestClient, body: Value) -> Value {
    let response = client.post("/tags", body).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.unwrap()
}

#[tokio::test]
async fn test_health() {
    let client = spawn_server(Taxonomy::new()).await;
    let response = client.get("/health").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_tag_lifecycle_over_http() {
    let client = spawn_server(Taxonomy::new()).await;

    let auth = create_tag(&client, json!({"name": "authentication", "color": "#3B82F6"})).await;
    let auth_id = auth["id"].as_str().unwrap().to_string();
    assert_eq!(auth["depth"], 0);

    let login = create_tag(
        &client,
        json!({"name": "login", "color": "#000000", "parentId": auth_id, "phase": "development"}),
    )
    .await;
    let login_id = login["id"].as_str().unwrap().to_string();
    assert_eq!(login["depth"], 1);
    assert_ne!(login["color"], "#000000");

    let leaf = create_tag(&client, json!({"name": "two-factor", "parent_id": login_id})).await;
    let leaf_id = leaf["id"].as_str().unwrap().to_string();

    let hierarchy: Vec<String> = client
        .get(&format!("/tags/{}/hierarchy", leaf_id))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(hierarchy, vec!["#authentication", "#>login", "#>>two-factor"]);

    let root_color: Value = client
        .get(&format!("/tags/{}/root-color", leaf_id))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(root_color["color"], "#3B82F6");

    let by_phase: Value = client
        .get("/tags?phase=development")
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_phase["total"], 1);
    assert_eq!(by_phase["items"][0]["id"], login_id.as_str());

    let tree: Value = client.get("/tags/tree").await.unwrap().json().await.unwrap();
    assert_eq!(tree[0]["display_name"], "#authentication");
    assert_eq!(tree[0]["children"][0]["children"][0]["display_name"], "#>>two-factor");

    let subtree: Value = client
        .get(&format!("/tags/{}/subtree", login_id))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(subtree["total"], 2);
    assert_eq!(subtree["items"][1]["relative_depth"], 1);

    let removed: Value = client
        .delete(&format!("/tags/{}", login_id))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(removed["removed"], json!([login_id, leaf_id]));

    let response = client.get(&format!("/tags/{}", leaf_id)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client.delete(&format!("/tags/{}", login_id)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let root: Value = client
        .get(&format!("/tags/{}", auth_id))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(root["children"], json!([]));
}

#[tokio::test]
async fn test_update_rules_over_http() {
    let client = spawn_server(Taxonomy::new()).await;
    let root = create_tag(&client, json!({"name": "frontend", "color": "#10B981"})).await;
    let root_id = root["id"].as_str().unwrap().to_string();
    let child = create_tag(&client, json!({"name": "styling", "parentId": root_id})).await;
    let child_id = child["id"].as_str().unwrap().to_string();

    let response = client
        .patch(&format!("/tags/{}", child_id), json!({"color": "#000000"}))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Reparenting is not part of the update payload
    let response = client
        .patch(&format!("/tags/{}", child_id), json!({"parent": null}))
        .await
        .unwrap();
    assert!(response.status().is_client_error());

    let updated: Value = client
        .patch(&format!("/tags/{}", root_id), json!({"color": "#ef4444", "name": "#ui"}))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["color"], "#EF4444");
    assert_eq!(updated["name"], "ui");

    let child: Value = client
        .get(&format!("/tags/{}", child_id))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        child["color"],
        tag_taxonomy::soften("#EF4444", 1).unwrap().as_str()
    );

    let response = client
        .post("/tags", json!({"name": "orphan", "parentId": "missing"}))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_domains_over_http() {
    let client = spawn_server(Taxonomy::new()).await;

    let response = client.post("/domains", json!({"label": "API"})).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = client.post("/domains", json!({"label": "api"})).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let domains: Value = client.get("/domains").await.unwrap().json().await.unwrap();
    assert_eq!(domains["items"], json!(["API"]));

    let removed: Value = client.delete("/domains/missing").await.unwrap().json().await.unwrap();
    assert_eq!(removed["removed"], false);

    let removed: Value = client.delete("/domains/API").await.unwrap().json().await.unwrap();
    assert_eq!(removed["removed"], true);
}

#[tokio::test]
async fn test_snapshot_export_and_replace() {
    let client = spawn_server(tag_taxonomy::seed::default_taxonomy().unwrap()).await;

    let snapshot: Value = client.get("/snapshot").await.unwrap().json().await.unwrap();
    assert!(snapshot["tags"].as_array().unwrap().len() > 10);
    assert_eq!(snapshot["tags"][0]["name"], "authentication");

    let replacement = json!({
        "tags": [
            {"id": "a", "name": "auth", "color": "#3B82F6"},
            {"id": "b", "name": "login", "color": "", "parentId": "a"}
        ],
        "domains": ["Security"]
    });
    let restored: Value = client.put("/snapshot", replacement).await.unwrap().json().await.unwrap();
    assert_eq!(restored["tags"].as_array().unwrap().len(), 2);
    assert_eq!(restored["tags"][1]["depth"], 1);
    assert_eq!(restored["tags"][0]["children"], json!(["b"]));

    let cyclic = json!({
        "tags": [
            {"id": "x", "name": "x", "color": "#3B82F6", "parent": "y"},
            {"id": "y", "name": "y", "color": "#3B82F6", "parent": "x"}
        ]
    });
    let response = client.put("/snapshot", cyclic).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let unchanged: Value = client.get("/snapshot").await.unwrap().json().await.unwrap();
    assert_eq!(unchanged["domains"], json!(["Security"]));
}

#[tokio::test]
async fn test_deep_tree_served_flat_but_not_nested() {
    let client = spawn_server(Taxonomy::new()).await;

    let levels = tag_taxonomy::MAX_NESTED_DEPTH + 1;
    let mut tags = vec![json!({"id": "t0", "name": "root", "color": "#3B82F6"})];
    for i in 1..=levels {
        tags.push(json!({
            "id": format!("t{}", i),
            "name": format!("level-{}", i),
            "color": "",
            "parent": format!("t{}", i - 1)
        }));
    }
    let response = client.put("/snapshot", json!({"tags": tags})).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = client.get("/tags/tree").await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let subtree: Value = client.get("/tags/t0/subtree").await.unwrap().json().await.unwrap();
    assert_eq!(subtree["total"], levels + 1);

    let hierarchy: Vec<String> = client
        .get(&format!("/tags/t{}/hierarchy", levels))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(hierarchy.len(), levels + 1);
}
