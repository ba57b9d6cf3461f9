//! Registration, login and logout

use crate::context::GlobalArgs;
use crate::output::{self, OutputFormat, Status};
use anyhow::{Context as _, Result};
use serde_json::json;
use tradepost_api_client::TokenStore;
use tradepost_api_client::models::{LoginRequest, RegisterRequest, Token};

/// Create an account
pub async fn register(
    globals: &GlobalArgs,
    username: String,
    email: String,
    password: String,
    address: Option<String>,
    phones: Vec<String>,
) -> Result<()> {
    let request = RegisterRequest {
        username,
        email,
        password,
        address,
        phones: if phones.is_empty() { None } else { Some(phones) },
    };

    let user = globals.client()?.auth().register(&request).await?;
    output::render(&user, globals.format, "Account created")
}

/// Log in and persist the returned credential
pub async fn login(globals: &GlobalArgs, username: &str, password: &str) -> Result<()> {
    let store = globals.token_store()?;
    let body = globals
        .client()?
        .auth()
        .login(LoginRequest::new(username, password))
        .await?;

    let token = Token::from_value(&body).context("login response carried no access token")?;
    store.store(&token.access_token)?;
    tracing::debug!(path = %store.path().display(), "Credential stored");

    match globals.format {
        OutputFormat::Json => {
            let summary = json!({
                "username": username,
                "token_type": token.token_type,
                "token_file": store.path(),
            });
            output::render(&summary, OutputFormat::Json, "")
        }
        OutputFormat::Text => {
            Status::success(&format!("Logged in as {username}"));
            Ok(())
        }
    }
}

/// Remove the stored credential
pub fn logout(globals: &GlobalArgs) -> Result<()> {
    let store = globals.token_store()?;
    store.clear()?;

    match globals.format {
        OutputFormat::Json => output::render(&json!({"logged_out": true}), OutputFormat::Json, ""),
        OutputFormat::Text => {
            Status::success("Logged out");
            Ok(())
        }
    }
}
