//! Messaging commands

use crate::context::GlobalArgs;
use crate::output;
use anyhow::Result;

/// Send a message about an item
pub async fn send(globals: &GlobalArgs, receiver_id: i64, item_id: i64, content: &str) -> Result<()> {
    let message = globals
        .client()?
        .messages()
        .send(receiver_id, content, item_id)
        .await?;
    output::render(&message, globals.format, "Message sent")
}

/// Show the conversation with a user about an item
pub async fn history(globals: &GlobalArgs, user_id: i64, item_id: i64) -> Result<()> {
    let messages = globals.client()?.messages().history(user_id, item_id).await?;
    output::render(&messages, globals.format, "No messages")
}

/// List conversations
pub async fn conversations(globals: &GlobalArgs) -> Result<()> {
    let conversations = globals.client()?.messages().conversations().await?;
    output::render(&conversations, globals.format, "No conversations")
}
