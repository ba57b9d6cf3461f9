//! Transaction endpoints
//!
//! Status values are opaque to the client; the backend decides which
//! transitions are allowed.

use crate::client::MarketClient;
use crate::error::ApiResult;
use crate::models::{TransactionCreate, TransactionUpdate};
use crate::operation::Operation;
use serde_json::Value;

/// Transactions API interface
#[derive(Clone)]
pub struct TransactionsApi {
    client: MarketClient,
}

impl TransactionsApi {
    /// Create a new transactions API interface
    pub(crate) fn new(client: MarketClient) -> Self {
        Self { client }
    }

    /// Start a transaction for an item
    ///
    /// POST /transactions/
    pub async fn create(&self, item_id: i64) -> ApiResult<Value> {
        let request = Operation::CreateTransaction
            .request()
            .json(&TransactionCreate { item_id })?;
        self.client.execute(request).await
    }

    /// List the caller's transactions
    ///
    /// GET /transactions/
    pub async fn list(&self) -> ApiResult<Value> {
        self.client.execute(Operation::ListTransactions.request()).await
    }

    /// Change a transaction's status
    ///
    /// PUT /transactions/<id>
    pub async fn update_status(&self, id: i64, status: impl Into<String>) -> ApiResult<Value> {
        let request = Operation::UpdateTransactionStatus
            .request()
            .with_id(id)
            .json(&TransactionUpdate {
                status: status.into(),
            })?;
        self.client.execute(request).await
    }

    /// Delete a transaction
    ///
    /// DELETE /transactions/<id>
    pub async fn delete(&self, id: i64) -> ApiResult<Value> {
        self.client
            .execute(Operation::DeleteTransaction.request().with_id(id))
            .await
    }
}
