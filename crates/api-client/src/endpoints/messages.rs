//! Messaging endpoints
//!
//! A conversation is identified by the counterpart *and* the item it is about:
//! the same two users can hold separate conversations about different items.

use crate::client::MarketClient;
use crate::error::ApiResult;
use crate::models::MessageCreate;
use crate::operation::{ApiRequest, Operation};
use serde_json::Value;

/// Messages API interface
#[derive(Clone)]
pub struct MessagesApi {
    client: MarketClient,
}

impl MessagesApi {
    /// Create a new messages API interface
    pub(crate) fn new(client: MarketClient) -> Self {
        Self { client }
    }

    /// Send a message about an item
    ///
    /// POST /messages/
    pub async fn send(
        &self,
        receiver_id: i64,
        content: impl Into<String>,
        item_id: i64,
    ) -> ApiResult<Value> {
        let request = Operation::SendMessage.request().json(&MessageCreate {
            receiver_id,
            content: content.into(),
            item_id,
        })?;
        self.client.execute(request).await
    }

    /// Message history with `other_user_id` about `item_id`
    ///
    /// GET /messages/<other_user_id>?token=..&item_id=<item_id>
    pub async fn history(&self, other_user_id: i64, item_id: i64) -> ApiResult<Value> {
        self.client
            .execute(history_request(other_user_id, item_id))
            .await
    }

    /// List the caller's conversations
    ///
    /// GET /conversations/
    pub async fn conversations(&self) -> ApiResult<Value> {
        self.client
            .execute(Operation::ListConversations.request())
            .await
    }
}

fn history_request(other_user_id: i64, item_id: i64) -> ApiRequest {
    Operation::GetHistory
        .request()
        .with_id(other_user_id)
        .query("item_id", item_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_request_targets_counterpart_and_item() {
        let request = history_request(7, 42);
        assert_eq!(request.path(), "/messages/7");
        assert_eq!(
            request.query_pairs(),
            &[("item_id".to_string(), "42".to_string())]
        );
    }
}
