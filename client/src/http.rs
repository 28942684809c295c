//! Typed HTTP client for the store ratings API.
//!
//! Authentication is cookie based: the underlying `reqwest` client keeps a
//! cookie store, so signing in once authorizes every later call made through
//! the same [`HttpClient`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;

use crate::error::ClientError;
use crate::feed::StoreQuery;
use crate::types::{
    DashboardStats, ErrorBody, LoginResponse, MyRating, NewStore, OwnerOption, RatingSubmitted,
    SessionUser, StoreCreated, StorePage,
};

/// The part of the API the store feed depends on.
#[async_trait]
pub trait StoreApi: Send + Sync {
    /// Fetches one page of the store listing for `query`.
    async fn list_stores(&self, query: &StoreQuery, page: u64) -> Result<StorePage, ClientError>;
}

#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<HttpClientInner>,
}

struct HttpClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Creates a client rooted at `base_url`, e.g. `http://localhost:3000`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not http(s) or the HTTP client fails to build.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::BaseUrl(base_url));
        }

        let client = reqwest::Client::builder().cookie_store(true).build()?;

        Ok(Self {
            inner: Arc::new(HttpClientInner { client, base_url }),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ClientError> {
        let response = self.inner.client.get(self.url(path)).query(query).send().await?;
        handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<T, ClientError> {
        let response = self.inner.client.post(self.url(path)).json(body).send().await?;
        handle_response(response).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, ClientError> {
        let response: LoginResponse = self
            .post("/auth/login", &json!({ "email": email, "password": password }))
            .await?;
        tracing::debug!(user_id = response.user.id, "signed in");
        Ok(response.user)
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let _: serde_json::Value = self.post("/auth/logout", &json!({})).await?;
        Ok(())
    }

    /// Owner autocomplete for the admin store form.
    pub async fn search_owners(&self, q: &str) -> Result<Vec<OwnerOption>, ClientError> {
        self.get("/admin/owners", &[("q", q.to_owned())]).await
    }

    pub async fn create_store(&self, store: &NewStore) -> Result<StoreCreated, ClientError> {
        self.post("/admin/stores", store).await
    }

    pub async fn dashboard(&self) -> Result<DashboardStats, ClientError> {
        self.get("/admin/dashboard", &[]).await
    }

    pub async fn rate_store(&self, store_id: i64, rating: i32) -> Result<RatingSubmitted, ClientError> {
        self.post(&format!("/user/stores/{store_id}/rate"), &json!({ "rating": rating }))
            .await
    }

    pub async fn my_ratings(&self) -> Result<Vec<MyRating>, ClientError> {
        self.get("/user/rating", &[]).await
    }
}

#[async_trait]
impl StoreApi for HttpClient {
    async fn list_stores(&self, query: &StoreQuery, page: u64) -> Result<StorePage, ClientError> {
        self.get("/store", &query.to_params(page)).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status.canonical_reason().unwrap_or("Unknown error").to_owned(),
    };

    Err(match status.as_u16() {
        401 => ClientError::Unauthorized(message),
        403 => ClientError::Forbidden(message),
        404 => ClientError::NotFound(message),
        code => ClientError::Api { status: code, message },
    })
}
