use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::models::{Payment, PaymentInput};
use crate::{ApiFailure, Db};

pub(crate) fn routes() -> Router<Db> {
    Router::new()
        .route("/payments", post(add_payment))
        .route("/payments/user/{user_id}", get(list_payments_for_user))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentQuery {
    order_id: Option<u64>,
    user_id: Option<u64>,
}

/// Paying an order flips its payment status to `PAID`.
async fn add_payment(
    State(db): State<Db>,
    Query(query): Query<PaymentQuery>,
    Json(input): Json<PaymentInput>,
) -> Result<(StatusCode, Json<Payment>), ApiFailure> {
    let mut store = db.write().await;
    let order_id = query.order_id.or(input.order_id);
    if let Some(order_id) = order_id {
        let order = store
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| ApiFailure::not_found("Order", order_id))?;
        order.payment_status = "PAID".to_string();
    }
    let payment = Payment {
        payment_id: store.next_id(),
        total_price: input.total_price,
        order_id,
        paid_date: input.paid_date,
        paid_amount: input.paid_amount,
        user_id: query.user_id.or(input.user_id),
    };
    store.payments.insert(payment.payment_id, payment.clone());
    tracing::info!(payment_id = payment.payment_id, ?order_id, "payment recorded");
    Ok((StatusCode::CREATED, Json(payment)))
}

async fn list_payments_for_user(
    State(db): State<Db>,
    Path(user_id): Path<u64>,
) -> Json<Vec<Payment>> {
    let store = db.read().await;
    Json(
        store
            .payments
            .values()
            .filter(|payment| payment.user_id == Some(user_id))
            .cloned()
            .collect(),
    )
}
