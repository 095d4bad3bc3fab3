//! In-memory stand-in for the groceteria backend.
//!
//! Serves the same REST surface under `/api/v1` with the same status codes
//! (201 on create, 200 on delete, 404 for unknown ids) and keeps everything
//! in a single `RwLock`-guarded store.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

mod cart;
mod items;
pub mod models;
mod orders;
mod payments;
mod users;

pub use models::{Cart, Item, ItemPage, Order, Payment, User};

pub const API_PREFIX: &str = "/api/v1";

#[derive(Debug, Default)]
pub struct Store {
    pub items: BTreeMap<u64, Item>,
    pub carts: BTreeMap<u64, Cart>,
    pub orders: BTreeMap<u64, Order>,
    pub payments: BTreeMap<u64, Payment>,
    pub users: BTreeMap<u64, models::UserRecord>,
    last_id: u64,
}

impl Store {
    /// Ids are unique across every collection.
    pub fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    /// A store with one admin account and a few items, for local runs.
    pub fn seeded() -> Self {
        let mut store = Store::default();
        let admin_id = store.next_id();
        store.users.insert(
            admin_id,
            models::UserRecord {
                user: User {
                    user_id: admin_id,
                    first_name: Some("Admin".to_string()),
                    email: "admin@groceteria.test".to_string(),
                    role: "ADMIN".to_string(),
                    ..User::default()
                },
                password: "admin123".to_string(),
            },
        );
        let samples = [
            ("Tomato", "VEGETABLES", 30.0),
            ("Spinach", "VEGETABLES", 25.0),
            ("Apple", "FRUITS", 120.0),
            ("Banana", "FRUITS", 40.0),
            ("Milk", "DAIRYPRODUCTS", 28.0),
            ("Paneer", "DAIRYPRODUCTS", 90.0),
            ("Basmati Rice", "GRAINSANDOILS", 150.0),
            ("Turmeric", "SPICESANDSEASONINGS", 35.0),
        ];
        for (name, category, price) in samples {
            let id = store.next_id();
            store.items.insert(
                id,
                Item {
                    item_id: id,
                    item_name: name.to_string(),
                    mrp_price: price,
                    quantity: 100,
                    category: Some(category.to_string()),
                    vendor_id: Some(admin_id),
                    ..Item::default()
                },
            );
        }
        store
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Error response in the backend's shape: status, message and error code.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    message: String,
    error_code: &'static str,
}

impl ApiFailure {
    pub fn not_found(what: &str, id: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("{what} not found with id {id}"),
            error_code: "RESOURCE_NOT_FOUND",
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            error_code: "BAD_REQUEST",
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
            error_code: "UNAUTHORIZED",
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
            error_code: "CONFLICT",
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = json!({
            "status": self.status.as_u16(),
            "message": self.message,
            "errorCode": self.error_code,
        });
        (self.status, Json(body)).into_response()
    }
}

pub fn app() -> Router {
    app_with_store(Store::default())
}

pub fn app_with_store(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    let api = Router::new()
        .merge(users::routes())
        .merge(items::routes())
        .merge(cart::routes())
        .merge(orders::routes())
        .merge(payments::routes());
    Router::new()
        .nest(API_PREFIX, api)
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_store(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_store(store)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_across_collections() {
        let mut store = Store::default();
        assert_eq!(store.next_id(), 1);
        assert_eq!(store.next_id(), 2);
    }

    #[test]
    fn seeded_store_has_admin_and_items() {
        let store = Store::seeded();
        assert_eq!(store.users.len(), 1);
        assert_eq!(store.items.len(), 8);
        let admin = store.users.values().next().unwrap();
        assert_eq!(admin.user.role, "ADMIN");
        assert!(store
            .items
            .values()
            .all(|item| item.vendor_id == Some(admin.user.user_id)));
    }

    #[test]
    fn failure_carries_status() {
        let response = ApiFailure::not_found("Item", 3).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = ApiFailure::conflict("taken").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
