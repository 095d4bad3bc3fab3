use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::models::{Order, OrderInput};
use crate::{ApiFailure, Db};

pub(crate) fn routes() -> Router<Db> {
    Router::new()
        .route("/orders", get(list_orders).post(place_order))
        .route("/orders/user/{user_id}", get(list_orders_for_user))
        .route("/orders/{order_id}", get(get_order))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceQuery {
    user_id: Option<u64>,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

async fn list_orders(State(db): State<Db>) -> Json<Vec<Order>> {
    let store = db.read().await;
    Json(store.orders.values().cloned().collect())
}

async fn list_orders_for_user(State(db): State<Db>, Path(user_id): Path<u64>) -> Json<Vec<Order>> {
    let store = db.read().await;
    Json(
        store
            .orders
            .values()
            .filter(|order| order.user_id == Some(user_id))
            .cloned()
            .collect(),
    )
}

async fn get_order(
    State(db): State<Db>,
    Path(order_id): Path<u64>,
) -> Result<Json<Order>, ApiFailure> {
    let store = db.read().await;
    store
        .orders
        .get(&order_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiFailure::not_found("Order", order_id))
}

/// The query's `userId` wins over the body's. Without an explicit total the
/// order is priced from the listed items.
async fn place_order(
    State(db): State<Db>,
    Query(query): Query<PlaceQuery>,
    Json(input): Json<OrderInput>,
) -> (StatusCode, Json<Order>) {
    let mut store = db.write().await;
    let total_price = input.total_price.unwrap_or_else(|| {
        input
            .item_ids
            .iter()
            .filter_map(|id| store.items.get(id))
            .map(|item| item.mrp_price)
            .sum()
    });
    let order = Order {
        order_id: store.next_id(),
        total_price,
        order_status: "PLACED".to_string(),
        payment_status: "PENDING".to_string(),
        order_date: now_millis(),
        user_id: query.user_id.or(input.user_id),
        item_ids: input.item_ids,
    };
    store.orders.insert(order.order_id, order.clone());
    tracing::info!(order_id = order.order_id, total_price, "order placed");
    (StatusCode::CREATED, Json(order))
}
