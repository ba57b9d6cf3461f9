//! Wishlist commands

use crate::context::GlobalArgs;
use crate::output;
use anyhow::Result;

/// Add an item to the wishlist
pub async fn add(globals: &GlobalArgs, item_id: i64) -> Result<()> {
    let entry = globals.client()?.wishlist().add(item_id).await?;
    output::render(&entry, globals.format, &format!("Added item {item_id} to wishlist"))
}

/// List wishlisted items
pub async fn list(globals: &GlobalArgs) -> Result<()> {
    let entries = globals.client()?.wishlist().list().await?;
    output::render(&entries, globals.format, "Wishlist is empty")
}

/// Remove an item from the wishlist
pub async fn remove(globals: &GlobalArgs, item_id: i64) -> Result<()> {
    let removed = globals.client()?.wishlist().remove(item_id).await?;
    output::render(
        &removed,
        globals.format,
        &format!("Removed item {item_id} from wishlist"),
    )
}
