//! Synchronous client core for the groceteria ordering platform.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The host executes the actual
//! HTTP round-trip, so the core stays deterministic and testable.
//!
//! # Design
//! - `GroceteriaClient` is stateless and holds only `base_url`. It maps every
//!   backend operation (items, cart, orders, payments, users) to a
//!   `build_*` / `parse_*` pair.
//! - `ItemListView` is the admin item list: presentation state plus handlers
//!   that return `ViewEffect`s for the host to carry out.
//! - `Session` keeps customer and admin credentials in any `KeyValueStore`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod item_list;
pub mod route;
pub mod session;
pub mod types;

pub use client::GroceteriaClient;
pub use config::ClientConfig;
pub use error::{ApiError, ParseCategoryError, StorageError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use item_list::{CategoryFilter, ItemListView, ViewEffect};
pub use route::Route;
pub use session::{FileStore, KeyValueStore, MemoryStore, Session};
pub use types::{
    Cart, Category, Credentials, EmailRequest, Item, ItemPage, Order, PageEnvelope, Payment, User,
};
