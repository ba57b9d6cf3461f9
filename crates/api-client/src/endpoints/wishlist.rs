//! Wishlist endpoints

use crate::client::MarketClient;
use crate::error::ApiResult;
use crate::models::WishlistCreate;
use crate::operation::Operation;
use serde_json::Value;

/// Wishlist API interface
#[derive(Clone)]
pub struct WishlistApi {
    client: MarketClient,
}

impl WishlistApi {
    /// Create a new wishlist API interface
    pub(crate) fn new(client: MarketClient) -> Self {
        Self { client }
    }

    /// Add an item to the wishlist
    ///
    /// POST /wishlist/
    pub async fn add(&self, item_id: i64) -> ApiResult<Value> {
        let request = Operation::AddToWishlist
            .request()
            .json(&WishlistCreate { item_id })?;
        self.client.execute(request).await
    }

    /// List wishlist entries
    ///
    /// GET /wishlist/
    pub async fn list(&self) -> ApiResult<Value> {
        self.client.execute(Operation::ListWishlist.request()).await
    }

    /// Remove an item from the wishlist; resolves to `null` on success
    ///
    /// DELETE /wishlist/<item_id>
    pub async fn remove(&self, item_id: i64) -> ApiResult<Value> {
        self.client
            .execute(Operation::RemoveFromWishlist.request().with_id(item_id))
            .await
    }
}
