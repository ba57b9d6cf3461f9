//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for one resource family. All of them
//! configure an [`ApiRequest`](crate::operation::ApiRequest) and hand it to
//! [`MarketClient::execute`](crate::client::MarketClient::execute).
//!
//! ## Mapping to the backend
//!
//! | Module | Routes | Description |
//! |--------|--------|-------------|
//! | `auth` | `/users/`, `/login` | Registration and login |
//! | `items` | `/items/`, `/items/{id}` | Listing CRUD |
//! | `wishlist` | `/wishlist/`, `/wishlist/{item_id}` | Saved items |
//! | `users` | `/users/me`, `/users/{id}` | Profiles |
//! | `transactions` | `/transactions/`, `/transactions/{id}` | Purchases and exchanges |
//! | `messages` | `/messages/`, `/messages/{user_id}`, `/conversations/` | Messaging |

pub mod auth;
pub mod items;
pub mod messages;
pub mod transactions;
pub mod users;
pub mod wishlist;

pub use auth::AuthApi;
pub use items::ItemsApi;
pub use messages::MessagesApi;
pub use transactions::TransactionsApi;
pub use users::UsersApi;
pub use wishlist::WishlistApi;
