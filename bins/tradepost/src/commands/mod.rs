//! CLI command implementations

pub mod auth;
pub mod items;
pub mod media;
pub mod messages;
pub mod transactions;
pub mod users;
pub mod wishlist;
