//! Item listing commands

use crate::context::GlobalArgs;
use crate::output;
use anyhow::{Context as _, Result};
use std::fs;
use std::path::PathBuf;
use tradepost_api_client::models::{ImageUpload, NewItem};

pub use tradepost_api_client::models::ItemUpdate;

/// Listing fields collected from the command line
#[derive(Debug)]
pub struct Listing {
    pub title: String,
    pub condition: String,
    pub category: i64,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub exchange_for: Option<String>,
    pub images: Vec<PathBuf>,
}

impl Listing {
    fn into_new_item(self) -> Result<NewItem> {
        let mut item = NewItem::new(self.title, self.condition, self.category);
        if let Some(description) = self.description {
            item = item.with_description(description);
        }
        if let Some(price) = self.price {
            item = item.for_sale(price);
        }
        if let Some(desired) = self.exchange_for {
            item = item.for_exchange(desired);
        }

        for path in self.images {
            let bytes =
                fs::read(&path).with_context(|| format!("reading image {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());
            item = item.with_image(ImageUpload::from_file_name(file_name, bytes));
        }

        Ok(item)
    }
}

/// List items
pub async fn list(globals: &GlobalArgs, search: &str, sort: &str) -> Result<()> {
    let items = globals.client()?.items().list(search, sort).await?;
    output::render(&items, globals.format, "No items")
}

/// Show one item
pub async fn get(globals: &GlobalArgs, id: i64) -> Result<()> {
    let item = globals.client()?.items().get(id).await?;
    output::render(&item, globals.format, "No item")
}

/// Create a listing
pub async fn create(globals: &GlobalArgs, listing: Listing) -> Result<()> {
    let client = globals.client()?;
    let created = client.items().create(listing.into_new_item()?).await?;
    output::render(&created, globals.format, "Listing created")
}

/// Update a listing
pub async fn update(globals: &GlobalArgs, id: i64, update: ItemUpdate) -> Result<()> {
    let updated = globals.client()?.items().update(id, &update).await?;
    output::render(&updated, globals.format, "Listing updated")
}

/// Delete a listing
pub async fn delete(globals: &GlobalArgs, id: i64) -> Result<()> {
    let deleted = globals.client()?.items().delete(id).await?;
    output::render(&deleted, globals.format, &format!("Deleted item {id}"))
}
