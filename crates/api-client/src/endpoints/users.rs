//! User profile endpoints

use crate::client::MarketClient;
use crate::error::ApiResult;
use crate::operation::Operation;
use serde::Serialize;
use serde_json::Value;

/// Users API interface
#[derive(Clone)]
pub struct UsersApi {
    client: MarketClient,
}

impl UsersApi {
    /// Create a new users API interface
    pub(crate) fn new(client: MarketClient) -> Self {
        Self { client }
    }

    /// The caller's own profile
    ///
    /// GET /users/me
    pub async fn me(&self) -> ApiResult<Value> {
        self.client.execute(Operation::GetProfile.request()).await
    }

    /// Update the caller's own profile
    ///
    /// PUT /users/me
    pub async fn update_me<B: Serialize + ?Sized>(&self, profile: &B) -> ApiResult<Value> {
        let request = Operation::UpdateProfile.request().json(profile)?;
        self.client.execute(request).await
    }

    /// Another user's profile
    ///
    /// GET /users/<id>
    pub async fn get(&self, id: i64) -> ApiResult<Value> {
        self.client
            .execute(Operation::GetUser.request().with_id(id))
            .await
    }
}
