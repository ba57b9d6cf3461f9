//! Typed API access layer for the Tradepost marketplace backend
//!
//! Every backend resource action (authentication, item listings, wishlists,
//! transactions, user profiles, messaging) is exposed as one async method that
//! issues exactly one HTTP request and returns either the parsed JSON body or a
//! normalized [`ApiError`].
//!
//! # Features
//!
//! - **Explicit credentials**: the bearer token comes from an injected
//!   [`CredentialProvider`] instead of ambient storage
//! - **Operation table**: method, path, auth transport and fallback message are
//!   declared once per [`Operation`]
//! - **Uniform failures**: string and validation-error `detail` payloads are
//!   decoded once and rendered into a single message
//! - **Request correlation**: every call carries an `X-Request-ID` header
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tradepost_api_client::{ClientConfig, MarketClient, MemoryTokenStore, TokenStore};
//! use tradepost_api_client::models::{LoginRequest, Token};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryTokenStore::new());
//!     let client = MarketClient::with_config(ClientConfig::development(), store.clone())?;
//!
//!     let body = client.auth().login(LoginRequest::new("alice", "secret123")).await?;
//!     store.store(&Token::from_value(&body)?.access_token)?;
//!
//!     let items = client.items().list("shoe", "price").await?;
//!     println!("{items:#}");
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod credentials;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod operation;
pub mod urls;

pub use client::MarketClient;
pub use config::{ClientConfig, Environment};
pub use credentials::{
    CredentialProvider, FileTokenStore, MemoryTokenStore, StaticToken, TokenStore,
};
pub use error::{ApiError, ApiResult, ErrorDetail, ValidationIssue};
pub use operation::{ApiRequest, AuthMode, Endpoint, Operation};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::MarketClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::credentials::{CredentialProvider, TokenStore};
    pub use crate::endpoints::{
        AuthApi, ItemsApi, MessagesApi, TransactionsApi, UsersApi, WishlistApi,
    };
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::models::{LoginInput, LoginRequest, NewItem, Token};
}
