//! Request payloads and typed views of backend responses
//!
//! Operations return the response body as parsed JSON. The response structs
//! here are opt-in views for callers that want typed access.

use crate::error::{ApiError, ApiResult};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Auth
// ============================================================================

/// Account registration payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phones: Option<Vec<String>>,
}

/// Username/password pair sent to `/login`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Credential pair
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }
}

/// Login input in either of the shapes a caller may hold it
#[derive(Debug, Clone)]
pub enum LoginInput {
    /// Structured credential pair
    Credentials(LoginRequest),
    /// `application/x-www-form-urlencoded` fields, e.g. `username=a&password=b`
    FormEncoded(String),
}

impl LoginInput {
    /// Normalize into the credential pair that is sent.
    ///
    /// Form fields other than `username` and `password` are ignored. A
    /// repeated field keeps its last value; a missing field is left out of the
    /// body so the backend reports it as required.
    pub fn into_request(self) -> ApiResult<LoginRequest> {
        match self {
            Self::Credentials(request) => Ok(request),
            Self::FormEncoded(form) => {
                let pairs: Vec<(String, String)> = serde_urlencoded::from_str(&form)
                    .map_err(|e| ApiError::invalid_input(format!("malformed login form: {e}")))?;

                let mut request = LoginRequest::default();
                for (key, value) in pairs {
                    match key.as_str() {
                        "username" => request.username = Some(value),
                        "password" => request.password = Some(value),
                        _ => {}
                    }
                }
                Ok(request)
            }
        }
    }
}

impl From<LoginRequest> for LoginInput {
    fn from(request: LoginRequest) -> Self {
        Self::Credentials(request)
    }
}

/// Credential returned by a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

impl Token {
    /// Typed view of a login response body
    pub fn from_value(value: &Value) -> ApiResult<Self> {
        Ok(Self::deserialize(value)?)
    }
}

// ============================================================================
// Users
// ============================================================================

/// Partial profile update for `/users/me`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// User profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub is_active: bool,
    pub join_date: Option<String>,
    pub address: Option<String>,
    pub phones: Option<Vec<String>>,
}

// ============================================================================
// Items
// ============================================================================

/// An image file attached to a new listing
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Image with an explicit MIME type
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Image whose MIME type is guessed from the file extension
    pub fn from_file_name(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        let mime_type = guess_image_mime(&file_name).to_string();
        Self {
            file_name,
            mime_type,
            bytes: bytes.into(),
        }
    }
}

fn guess_image_mime(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// A new listing, sent as `multipart/form-data`
#[derive(Debug, Clone, Default)]
pub struct NewItem {
    pub title: String,
    pub description: Option<String>,
    pub condition: String,
    pub price: Option<i64>,
    /// `true` for exchange, `false` for sale
    pub exchange_type: bool,
    pub desired_item: Option<String>,
    pub category: i64,
    pub images: Vec<ImageUpload>,
}

impl NewItem {
    /// Listing with the required fields
    pub fn new(title: impl Into<String>, condition: impl Into<String>, category: i64) -> Self {
        Self {
            title: title.into(),
            condition: condition.into(),
            category,
            ..Self::default()
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Offer for sale at `price`
    #[must_use]
    pub fn for_sale(mut self, price: i64) -> Self {
        self.exchange_type = false;
        self.price = Some(price);
        self
    }

    /// Offer for exchange against `desired_item`
    #[must_use]
    pub fn for_exchange(mut self, desired_item: impl Into<String>) -> Self {
        self.exchange_type = true;
        self.desired_item = Some(desired_item.into());
        self
    }

    /// Attach an image
    #[must_use]
    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.images.push(image);
        self
    }

    /// Text field name/value pairs, in the order they are sent
    #[must_use]
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("title", self.title.clone()),
            ("condition", self.condition.clone()),
            ("exchange_type", self.exchange_type.to_string()),
            ("category", self.category.to_string()),
            ("total_images", self.images.len().to_string()),
        ];
        if let Some(ref description) = self.description {
            fields.push(("description", description.clone()));
        }
        if let Some(price) = self.price {
            fields.push(("price", price.to_string()));
        }
        if let Some(ref desired_item) = self.desired_item {
            fields.push(("desired_item", desired_item.clone()));
        }
        fields
    }

    /// Build the multipart form
    pub fn into_form(self) -> ApiResult<Form> {
        let mut form = Form::new();
        for (name, value) in self.text_fields() {
            form = form.text(name, value);
        }

        for image in self.images {
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.mime_type)
                .map_err(|e| ApiError::invalid_input(format!("invalid image type: {e}")))?;
            form = form.part("images", part);
        }

        Ok(form)
    }
}

/// Partial item update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_type: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

/// Listed item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub item_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub condition: String,
    pub owner_id: i64,
    pub post_date: Option<String>,
    pub price: Option<i64>,
    pub exchange_type: bool,
    #[serde(default)]
    pub status: bool,
    pub desired_item: Option<String>,
    #[serde(default)]
    pub total_images: i64,
    pub category: i64,
    pub images: Option<Vec<String>>,
}

// ============================================================================
// Wishlist, transactions, messages
// ============================================================================

/// Wishlist add payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WishlistCreate {
    pub item_id: i64,
}

/// Transaction create payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TransactionCreate {
    pub item_id: i64,
}

/// Transaction status change payload; status values are opaque here
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionUpdate {
    pub status: String,
}

/// Transaction record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: i64,
    pub item_id: i64,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub transaction_date: Option<String>,
    pub status: String,
    pub completion_date: Option<String>,
    pub item: Option<Item>,
}

/// Message send payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageCreate {
    pub receiver_id: i64,
    pub content: String,
    pub item_id: i64,
}

/// Message record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    pub sent_at: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    pub item_id: Option<i64>,
}
