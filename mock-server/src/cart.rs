use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use serde::Deserialize;

use crate::models::{Cart, CartInput};
use crate::{ApiFailure, Db};

pub(crate) fn routes() -> Router<Db> {
    Router::new()
        .route("/cart", get(list_cart).post(add_to_cart))
        .route("/cart/user/{user_id}", get(list_cart_for_user))
        .route("/cart/{cart_id}", delete(delete_cart))
        .route("/cart/{cart_id}/quantity", put(update_quantity))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddQuery {
    item_id: u64,
    user_id: u64,
}

#[derive(Debug, Deserialize)]
struct QuantityQuery {
    quantity: u64,
}

async fn list_cart(State(db): State<Db>) -> Json<Vec<Cart>> {
    let store = db.read().await;
    Json(store.carts.values().cloned().collect())
}

async fn list_cart_for_user(State(db): State<Db>, Path(user_id): Path<u64>) -> Json<Vec<Cart>> {
    let store = db.read().await;
    Json(
        store
            .carts
            .values()
            .filter(|cart| cart.user_id == user_id)
            .cloned()
            .collect(),
    )
}

/// The line's price defaults to the item's current price.
async fn add_to_cart(
    State(db): State<Db>,
    Query(query): Query<AddQuery>,
    Json(input): Json<CartInput>,
) -> Result<(StatusCode, Json<Cart>), ApiFailure> {
    let mut store = db.write().await;
    let item_price = store
        .items
        .get(&query.item_id)
        .map(|item| item.mrp_price)
        .ok_or_else(|| ApiFailure::not_found("Item", query.item_id))?;
    let cart = Cart {
        cart_id: store.next_id(),
        quantity: input.quantity.unwrap_or(1),
        mrp_price: input.mrp_price.unwrap_or(item_price),
        item_id: query.item_id,
        user_id: query.user_id,
    };
    store.carts.insert(cart.cart_id, cart.clone());
    Ok((StatusCode::CREATED, Json(cart)))
}

async fn delete_cart(
    State(db): State<Db>,
    Path(cart_id): Path<u64>,
) -> Result<StatusCode, ApiFailure> {
    let mut store = db.write().await;
    store
        .carts
        .remove(&cart_id)
        .ok_or_else(|| ApiFailure::not_found("Cart", cart_id))?;
    Ok(StatusCode::OK)
}

async fn update_quantity(
    State(db): State<Db>,
    Path(cart_id): Path<u64>,
    Query(query): Query<QuantityQuery>,
) -> Result<Json<Cart>, ApiFailure> {
    let mut store = db.write().await;
    let cart = store
        .carts
        .get_mut(&cart_id)
        .ok_or_else(|| ApiFailure::not_found("Cart", cart_id))?;
    cart.quantity = query.quantity;
    Ok(Json(cart.clone()))
}
