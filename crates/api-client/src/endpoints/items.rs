//! Item listing endpoints
//!
//! List and detail reads send the credential as a bearer header; create,
//! update and delete send it as the `token` query parameter.

use crate::client::MarketClient;
use crate::error::ApiResult;
use crate::models::NewItem;
use crate::operation::{ApiRequest, Operation};
use serde::Serialize;
use serde_json::Value;

/// Items API interface
#[derive(Clone)]
pub struct ItemsApi {
    client: MarketClient,
}

impl ItemsApi {
    /// Create a new items API interface
    pub(crate) fn new(client: MarketClient) -> Self {
        Self { client }
    }

    /// List items, optionally filtered by free-text `search` and ordered by `sort`
    ///
    /// GET /items/?search=<search>&sort=<sort>; empty values are left out
    pub async fn list(&self, search: &str, sort: &str) -> ApiResult<Value> {
        self.client.execute(list_request(search, sort)).await
    }

    /// List all items without filters
    pub async fn list_all(&self) -> ApiResult<Value> {
        self.list("", "").await
    }

    /// Create a listing
    ///
    /// POST /items/ (multipart)
    pub async fn create(&self, item: NewItem) -> ApiResult<Value> {
        let request = Operation::CreateItem.request().multipart(item.into_form()?);
        self.client.execute(request).await
    }

    /// Get a single item
    ///
    /// GET /items/<id>
    pub async fn get(&self, id: i64) -> ApiResult<Value> {
        self.client
            .execute(Operation::GetItem.request().with_id(id))
            .await
    }

    /// Update an item
    ///
    /// PUT /items/<id>
    pub async fn update<B: Serialize + ?Sized>(&self, id: i64, item: &B) -> ApiResult<Value> {
        let request = Operation::UpdateItem.request().with_id(id).json(item)?;
        self.client.execute(request).await
    }

    /// Delete an item
    ///
    /// DELETE /items/<id>
    pub async fn delete(&self, id: i64) -> ApiResult<Value> {
        self.client
            .execute(Operation::DeleteItem.request().with_id(id))
            .await
    }
}

fn list_request(search: &str, sort: &str) -> ApiRequest {
    Operation::ListItems
        .request()
        .query_non_empty("search", search)
        .query_non_empty("sort", sort)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_request_keeps_search_then_sort() {
        let request = list_request("shoe", "price");
        let pairs: Vec<(&str, &str)> = request
            .query_pairs()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(pairs, vec![("search", "shoe"), ("sort", "price")]);
        assert_eq!(request.path(), "/items/");
    }

    #[test]
    fn test_list_request_without_filters() {
        assert!(list_request("", "").query_pairs().is_empty());
    }
}
