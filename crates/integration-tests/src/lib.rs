//! Integration tests for the bookstore storefront.
//!
//! Each test spawns the full router on an ephemeral port and drives it with a
//! `reqwest` client that keeps cookies and follows redirects, so flash
//! messages can be read off the page a form post lands on.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bookstore-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shop` - browsing, search, cart and checkout
//! - `admin` - login, inventory management and sales history

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::net::SocketAddr;

use bookstore_core::Bookstore;
use bookstore_storefront::{app, config::StorefrontConfig, state::AppState};
use reqwest::{Client, Response, StatusCode};
use tokio::net::TcpListener;

/// A running storefront and a client with its own cookie jar.
pub struct TestApp {
    pub address: SocketAddr,
    pub client: Client,
    pub state: AppState,
}

impl TestApp {
    /// Serve a freshly seeded store with default configuration.
    pub async fn spawn() -> Self {
        Self::spawn_with(StorefrontConfig::default()).await
    }

    /// Serve a freshly seeded store with the given configuration.
    pub async fn spawn_with(config: StorefrontConfig) -> Self {
        let state = AppState::new(config);
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let address = listener.local_addr().expect("Failed to read local address");

        let router = app(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server failed");
        });

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            address,
            client,
            state,
        }
    }

    /// Absolute URL for a path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.address)
    }

    /// GET a page and return its status and body.
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed");
        into_parts(response).await
    }

    /// POST a form and return the status and body of the final page.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> (StatusCode, String) {
        let response = self
            .client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request failed");
        into_parts(response).await
    }

    /// Log in with the default admin credentials.
    pub async fn login(&self) -> (StatusCode, String) {
        self.post_form("/admin/login", &[("username", "admin"), ("password", "1234")])
            .await
    }

    /// A copy of the store as it is now.
    pub async fn store(&self) -> Bookstore {
        self.state.store().lock().await.clone()
    }
}

async fn into_parts(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let body = response.text().await.expect("Failed to read body");
    (status, body)
}
