use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use perkbox::config::{Config, DatabaseConfig};
use perkbox::db::{MemoryUserStore, UserStore};
use perkbox::models::{Role, User};

/// A running test server backed by an in-memory store.
pub struct TestApp {
    pub addr: SocketAddr,
    pub store: Arc<MemoryUserStore>,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Put a user straight into the store, bypassing the API.
    pub async fn seed(&self, business_id: Uuid, role: Role) -> User {
        let user = User {
            id: Uuid::now_v7(),
            business_id,
            name: "Seeded".to_string(),
            role,
            email: "seeded@example.com".to_string(),
        };
        self.store.create(&user).await.expect("seed user failed")
    }

    /// POST /api/users as an admin of `business` and return (body, status).
    pub async fn create_user(&self, business: &str, user: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/users"))
            .header("X-User-Role", "admin")
            .header("X-User-Business", business)
            .json(user)
            .send()
            .await
            .expect("create request failed");
        read(resp).await
    }

    /// DELETE /api/users/{id} as an admin of `business`.
    pub async fn delete_user(&self, id: &str, business: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(&format!("/api/users/{id}")))
            .header("X-User-Role", "admin")
            .header("X-User-Business", business)
            .send()
            .await
            .expect("delete request failed");
        read(resp).await
    }

    /// PUT /api/users/{id} as caller `caller`.
    pub async fn update_user(&self, id: &str, caller: &str, user: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(&format!("/api/users/{id}")))
            .header("X-User-Id", caller)
            .json(user)
            .send()
            .await
            .expect("update request failed");
        read(resp).await
    }

    /// GET /api/users/{id} without any claims.
    pub async fn get_user(&self, id: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(&format!("/api/users/{id}")))
            .send()
            .await
            .expect("get request failed");
        read(resp).await
    }

    /// GET /api/businesses/{path_business}/users as an admin claiming `header_business`.
    pub async fn list_users(&self, path_business: &str, header_business: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(&format!("/api/businesses/{path_business}/users")))
            .header("X-User-Role", "admin")
            .header("X-User-Business", header_business)
            .send()
            .await
            .expect("list request failed");
        read(resp).await
    }
}

async fn read(resp: reqwest::Response) -> (Value, StatusCode) {
    let status = resp.status();
    let body: Value = resp.json().await.unwrap_or(json!(null));
    (body, status)
}

pub fn user_json(id: Uuid, business_id: Uuid, name: &str, role: &str) -> Value {
    json!({
        "id": id,
        "business_id": business_id,
        "name": name,
        "role": role,
        "email": format!("{}@example.com", name.to_lowercase()),
    })
}

pub fn test_config() -> Config {
    Config {
        database: DatabaseConfig {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: String::new(),
            password: String::new(),
            name: String::new(),
            max_connections: 1,
            run_migrations: false,
        },
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 64 * 1024,
        log_level: "warn".to_string(),
    }
}

/// Spawn the app on a random port with an empty in-memory store.
pub async fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryUserStore::new());
    let addr = serve(store.clone()).await;

    TestApp {
        addr,
        store,
        client: Client::new(),
    }
}

/// Serve the app over `users` on a random port and return its address.
pub async fn serve(users: Arc<dyn UserStore>) -> SocketAddr {
    let app = perkbox::build_app(users, &test_config());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    addr
}
