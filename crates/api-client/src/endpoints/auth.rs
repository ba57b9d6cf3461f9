//! Registration and login endpoints
//!
//! Both routes are unauthenticated. A successful login returns the new
//! credential; persisting it is up to the caller (see
//! [`TokenStore`](crate::credentials::TokenStore)).

use crate::client::MarketClient;
use crate::error::ApiResult;
use crate::models::LoginInput;
use crate::operation::Operation;
use serde::Serialize;
use serde_json::Value;

/// Auth API interface
#[derive(Clone)]
pub struct AuthApi {
    client: MarketClient,
}

impl AuthApi {
    /// Create a new auth API interface
    pub(crate) fn new(client: MarketClient) -> Self {
        Self { client }
    }

    /// Register a new account
    ///
    /// POST /users/
    pub async fn register<B: Serialize + ?Sized>(&self, user: &B) -> ApiResult<Value> {
        let request = Operation::Register.request().json(user)?;
        self.client.execute(request).await
    }

    /// Log in with a credential pair or its form-encoded equivalent
    ///
    /// POST /login, body exactly `{"username": .., "password": ..}`
    pub async fn login(&self, input: impl Into<LoginInput>) -> ApiResult<Value> {
        let credentials = input.into().into_request()?;
        let request = Operation::Login.request().json(&credentials)?;
        self.client.execute(request).await
    }
}
