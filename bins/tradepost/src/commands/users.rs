//! User profile commands

use crate::context::GlobalArgs;
use crate::output;
use anyhow::{Result, bail};
use tradepost_api_client::models::ProfileUpdate;

/// Show the logged-in user
pub async fn me(globals: &GlobalArgs) -> Result<()> {
    let profile = globals.client()?.users().me().await?;
    output::render(&profile, globals.format, "No profile")
}

/// Update the logged-in user
pub async fn update_me(
    globals: &GlobalArgs,
    email: Option<String>,
    password: Option<String>,
    address: Option<String>,
) -> Result<()> {
    if email.is_none() && password.is_none() && address.is_none() {
        bail!("nothing to update: pass --email, --password or --address");
    }

    let update = ProfileUpdate {
        email,
        password,
        address,
    };
    let profile = globals.client()?.users().update_me(&update).await?;
    output::render(&profile, globals.format, "Profile updated")
}

/// Show another user
pub async fn get(globals: &GlobalArgs, id: i64) -> Result<()> {
    let user = globals.client()?.users().get(id).await?;
    output::render(&user, globals.format, "No user")
}
