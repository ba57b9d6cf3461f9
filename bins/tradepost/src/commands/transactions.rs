//! Transaction commands

use crate::context::GlobalArgs;
use crate::output;
use anyhow::Result;

/// Start a transaction for an item
pub async fn create(globals: &GlobalArgs, item_id: i64) -> Result<()> {
    let transaction = globals.client()?.transactions().create(item_id).await?;
    output::render(&transaction, globals.format, "Transaction started")
}

/// List transactions
pub async fn list(globals: &GlobalArgs) -> Result<()> {
    let transactions = globals.client()?.transactions().list().await?;
    output::render(&transactions, globals.format, "No transactions")
}

/// Change a transaction's status
pub async fn status(globals: &GlobalArgs, id: i64, status: String) -> Result<()> {
    let message = format!("Transaction {id} is now {status}");
    let transaction = globals
        .client()?
        .transactions()
        .update_status(id, status)
        .await?;
    output::render(&transaction, globals.format, &message)
}

/// Delete a transaction
pub async fn delete(globals: &GlobalArgs, id: i64) -> Result<()> {
    let deleted = globals.client()?.transactions().delete(id).await?;
    output::render(&deleted, globals.format, &format!("Deleted transaction {id}"))
}
