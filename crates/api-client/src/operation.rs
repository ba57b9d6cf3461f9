//! Operation table
//!
//! Every resource action is one [`Operation`]. Its method, path template,
//! credential transport and fallback failure message live here, so endpoint
//! groups only supply identifiers, query parameters and payloads.
//!
//! ## Credential transport
//!
//! The backend reads the token from an `Authorization: Bearer` header on the
//! item list/detail routes and from a `token` query parameter everywhere else.
//! The split is a backend compatibility requirement: the table reproduces it
//! per route and nothing else in the crate chooses a transport.

use crate::error::ApiResult;
use reqwest::Method;
use reqwest::multipart::Form;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Placeholder for the resource id in a path template
const ID_PLACEHOLDER: &str = "{id}";

/// How the credential is attached to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Unauthenticated
    None,
    /// `Authorization: Bearer <token>` header
    Header,
    /// `token=<token>` query parameter, placed before any other parameter
    Query,
}

/// Static description of one backend route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// HTTP method
    pub method: Method,
    /// Path template relative to the backend root; may contain `{id}`
    pub path: &'static str,
    /// Credential transport
    pub auth: AuthMode,
    /// Message used when the failure body carries no usable `detail`
    pub fallback: &'static str,
}

/// Resource actions exposed by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Create a user account
    Register,
    /// Exchange username and password for a token
    Login,
    /// List items, optionally searched and sorted
    ListItems,
    /// Create an item listing (multipart)
    CreateItem,
    /// Fetch one item
    GetItem,
    /// Update an item
    UpdateItem,
    /// Delete an item
    DeleteItem,
    /// Add an item to the caller's wishlist
    AddToWishlist,
    /// List the caller's wishlist
    ListWishlist,
    /// Remove an item from the caller's wishlist
    RemoveFromWishlist,
    /// Fetch the caller's profile
    GetProfile,
    /// Update the caller's profile
    UpdateProfile,
    /// Fetch another user's profile
    GetUser,
    /// Start a transaction for an item
    CreateTransaction,
    /// List the caller's transactions
    ListTransactions,
    /// Change the status of a transaction
    UpdateTransactionStatus,
    /// Delete a transaction
    DeleteTransaction,
    /// Send a message about an item
    SendMessage,
    /// Conversation history with one user about one item
    GetHistory,
    /// List the caller's conversations
    ListConversations,
}

impl Operation {
    /// Every operation, in table order
    pub const ALL: [Self; 20] = [
        Self::Register,
        Self::Login,
        Self::ListItems,
        Self::CreateItem,
        Self::GetItem,
        Self::UpdateItem,
        Self::DeleteItem,
        Self::AddToWishlist,
        Self::ListWishlist,
        Self::RemoveFromWishlist,
        Self::GetProfile,
        Self::UpdateProfile,
        Self::GetUser,
        Self::CreateTransaction,
        Self::ListTransactions,
        Self::UpdateTransactionStatus,
        Self::DeleteTransaction,
        Self::SendMessage,
        Self::GetHistory,
        Self::ListConversations,
    ];

    /// The route this operation targets
    #[must_use]
    pub fn endpoint(self) -> Endpoint {
        use AuthMode::{Header, Query};

        let (method, path, auth, fallback) = match self {
            Self::Register => (Method::POST, "/users/", AuthMode::None, "Registration failed"),
            Self::Login => (
                Method::POST,
                "/login",
                AuthMode::None,
                "Incorrect username or password",
            ),
            Self::ListItems => (Method::GET, "/items/", Header, "Could not fetch items"),
            Self::CreateItem => (Method::POST, "/items/", Query, "Could not create listing"),
            Self::GetItem => (Method::GET, "/items/{id}", Header, "Could not fetch item details"),
            Self::UpdateItem => (Method::PUT, "/items/{id}", Query, "Could not update item"),
            Self::DeleteItem => (Method::DELETE, "/items/{id}", Query, "Could not delete item"),
            Self::AddToWishlist => (Method::POST, "/wishlist/", Query, "Could not add to wishlist"),
            Self::ListWishlist => (Method::GET, "/wishlist/", Query, "Could not fetch wishlist"),
            Self::RemoveFromWishlist => (
                Method::DELETE,
                "/wishlist/{id}",
                Query,
                "Could not remove from wishlist",
            ),
            Self::GetProfile => (Method::GET, "/users/me", Query, "Could not fetch profile"),
            Self::UpdateProfile => (Method::PUT, "/users/me", Query, "Could not update profile"),
            Self::GetUser => (Method::GET, "/users/{id}", Query, "Could not fetch user"),
            Self::CreateTransaction => (
                Method::POST,
                "/transactions/",
                Query,
                "Could not create transaction",
            ),
            Self::ListTransactions => (
                Method::GET,
                "/transactions/",
                Query,
                "Could not fetch transactions",
            ),
            Self::UpdateTransactionStatus => (
                Method::PUT,
                "/transactions/{id}",
                Query,
                "Could not update status",
            ),
            Self::DeleteTransaction => (
                Method::DELETE,
                "/transactions/{id}",
                Query,
                "Could not delete transaction",
            ),
            Self::SendMessage => (Method::POST, "/messages/", Query, "Could not send message"),
            Self::GetHistory => (Method::GET, "/messages/{id}", Query, "Could not fetch messages"),
            Self::ListConversations => (
                Method::GET,
                "/conversations/",
                Query,
                "Could not fetch conversations",
            ),
        };

        Endpoint {
            method,
            path,
            auth,
            fallback,
        }
    }

    /// Start building a request for this operation
    #[must_use]
    pub fn request(self) -> ApiRequest {
        ApiRequest::new(self)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let endpoint = self.endpoint();
        write!(f, "{:?} ({} {})", self, endpoint.method, endpoint.path)
    }
}

/// Request payload
pub enum RequestBody {
    /// No body
    Empty,
    /// JSON document
    Json(Value),
    /// `multipart/form-data`
    Multipart(Form),
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Self::Multipart(_) => f.write_str("Multipart"),
        }
    }
}

/// One concrete call: an operation with its path, query and body filled in
#[derive(Debug)]
pub struct ApiRequest {
    operation: Operation,
    path: String,
    query: Vec<(String, String)>,
    body: RequestBody,
}

impl ApiRequest {
    /// Request for `operation` with the bare path template
    #[must_use]
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            path: operation.endpoint().path.to_string(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Fill the `{id}` segment of the path
    #[must_use]
    pub fn with_id(mut self, id: impl fmt::Display) -> Self {
        self.path = self.path.replace(ID_PLACEHOLDER, &id.to_string());
        self
    }

    /// Append a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append a query parameter only when `value` is non-empty
    #[must_use]
    pub fn query_non_empty(self, key: impl Into<String>, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.query(key, value)
        }
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach a multipart body
    #[must_use]
    pub fn multipart(mut self, form: Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// The operation being performed
    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Rendered path relative to the backend root
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Operation-specific query parameters, in insertion order
    #[must_use]
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Request payload
    #[must_use]
    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub(crate) fn into_parts(self) -> (Operation, String, Vec<(String, String)>, RequestBody) {
        (self.operation, self.path, self.query, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_auth_only_on_item_reads() {
        let header_ops: Vec<Operation> = Operation::ALL
            .into_iter()
            .filter(|op| op.endpoint().auth == AuthMode::Header)
            .collect();
        assert_eq!(header_ops, vec![Operation::ListItems, Operation::GetItem]);
    }

    #[test]
    fn test_auth_operations_are_unauthenticated() {
        assert_eq!(Operation::Register.endpoint().auth, AuthMode::None);
        assert_eq!(Operation::Login.endpoint().auth, AuthMode::None);
    }

    #[test]
    fn test_every_operation_has_a_fallback() {
        for op in Operation::ALL {
            let endpoint = op.endpoint();
            assert!(!endpoint.fallback.is_empty(), "{op} has no fallback");
            assert!(endpoint.path.starts_with('/'), "{op} path is not rooted");
        }
    }

    #[test]
    fn test_with_id_fills_template() {
        let request = Operation::UpdateTransactionStatus.request().with_id(17);
        assert_eq!(request.path(), "/transactions/17");
        assert_eq!(request.operation(), Operation::UpdateTransactionStatus);
    }

    #[test]
    fn test_query_non_empty_skips_blank_values() {
        let request = Operation::ListItems
            .request()
            .query_non_empty("search", "shoe")
            .query_non_empty("sort", "");
        assert_eq!(
            request.query_pairs(),
            &[("search".to_string(), "shoe".to_string())]
        );
    }

    #[test]
    fn test_json_body() {
        let request = Operation::AddToWishlist
            .request()
            .json(&json!({"item_id": 3}))
            .unwrap();
        match request.body() {
            RequestBody::Json(value) => assert_eq!(value, &json!({"item_id": 3})),
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_display_names_route() {
        assert_eq!(Operation::GetHistory.to_string(), "GetHistory (GET /messages/{id})");
    }
}
