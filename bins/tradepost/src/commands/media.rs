//! Media URL resolution (offline)

use crate::context::GlobalArgs;
use crate::output::OutputFormat;
use anyhow::Result;
use serde_json::json;
use tradepost_api_client::urls;

/// Print the browsable URL for a stored media path
pub fn run(globals: &GlobalArgs, path: &str) -> Result<()> {
    let config = globals.client_config()?;
    let url = urls::full_image_url(&config.base_url, path);

    match globals.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&json!({ "url": url }))?),
        OutputFormat::Text => println!("{url}"),
    }
    Ok(())
}
