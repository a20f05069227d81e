//! Order routes: checkout, customer tracking and admin fulfilment.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use domain::models::order::{
    generate_order_number, CheckoutRequest, Order, OrderQuery, TrackOrderQuery,
    UpdateOrderStatusRequest, UpdatePaymentStatusRequest,
};
use domain::models::product::Product;
use domain::services::{price_order, CheckoutError};
use persistence::repositories::{NewOrder, OrderRepository, ProductRepository};
use shared::pagination::{PageParams, Paginated};
use shared::validation::normalize_phone;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_order_placed;

/// Attempts at finding a free order number before giving up.
const ORDER_NUMBER_ATTEMPTS: usize = 3;

fn order_not_found() -> ApiError {
    ApiError::NotFound("Order not found".into())
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Overflow => ApiError::BadRequest(err.to_string()),
            _ => ApiError::validation(err.to_string()),
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

/// Place an order.
///
/// POST /api/orders
///
/// Prices come from the catalog; the client only sends product ids and
/// quantities.
pub async fn checkout(
    State(state): State<AppState>,
    Json(mut request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    request.validate()?;
    request.customer.phone = normalize_phone(&request.customer.phone);
    request.customer.name = request.customer.name.trim().to_string();

    let mut ids: Vec<Uuid> = request.items.iter().map(|i| i.product_id).collect();
    ids.sort_unstable();
    ids.dedup();

    let catalog: HashMap<Uuid, Product> = ProductRepository::new(state.pool.clone())
        .find_by_ids(&ids)
        .await?
        .into_iter()
        .map(|entity| {
            let product = Product::from(entity);
            (product.id, product)
        })
        .collect();

    let priced = price_order(&request.items, &catalog)?;
    let notes = request
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let repo = OrderRepository::new(state.pool.clone());
    let mut attempt = 0;
    let order: Order = loop {
        attempt += 1;
        let order_number = generate_order_number(Utc::now());
        let new_order = NewOrder {
            order_number: &order_number,
            customer: &request.customer,
            items: &priced.items,
            subtotal: priced.subtotal,
            total: priced.total,
            notes,
        };
        match repo.create(&new_order).await {
            Ok(entity) => break entity.into(),
            Err(e) if is_unique_violation(&e) && attempt < ORDER_NUMBER_ATTEMPTS => {
                warn!(order_number = %order_number, "Order number collision, retrying");
            }
            Err(e) => return Err(e.into()),
        }
    };

    record_order_placed(order.total);
    info!(
        order_id = %order.id,
        order_number = %order.order_number,
        total = order.total,
        items = order.items.len(),
        "Order placed"
    );
    Ok((StatusCode::CREATED, Json(order)))
}

/// Track an order.
///
/// GET /api/orders/:order_number?phone=
///
/// The phone must match the one used at checkout; a mismatch is a 404.
pub async fn track_order(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
    Query(query): Query<TrackOrderQuery>,
) -> Result<Json<Order>, ApiError> {
    let phone = normalize_phone(&query.phone);
    if phone.is_empty() {
        return Err(ApiError::validation("Phone is required"));
    }

    let order = OrderRepository::new(state.pool.clone())
        .find_by_number_and_phone(order_number.trim(), &phone)
        .await?
        .ok_or_else(order_not_found)?;
    Ok(Json(order.into()))
}

/// List orders.
///
/// GET /api/admin/orders
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Result<Json<Paginated<Order>>, ApiError> {
    let page = PageParams {
        page: query.page,
        limit: query.limit,
    };
    let status = query.status.map(|s| s.as_str());
    let payment_status = query.payment_status.map(|p| p.as_str());

    let repo = OrderRepository::new(state.pool.clone());
    let total = repo.count(status, payment_status).await?;
    let orders = repo
        .list(
            status,
            payment_status,
            i64::from(page.limit()),
            page.offset(),
        )
        .await?;

    Ok(Json(Paginated::new(
        orders.into_iter().map(Order::from).collect(),
        &page,
        total,
    )))
}

/// Get an order.
///
/// GET /api/admin/orders/:order_id
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    let order = OrderRepository::new(state.pool.clone())
        .find_by_id(order_id)
        .await?
        .ok_or_else(order_not_found)?;
    Ok(Json(order.into()))
}

/// Move an order to its next status.
///
/// PATCH /api/admin/orders/:order_id/status
///
/// Invalid transitions are a 400; a concurrent change is a 409.
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(request): Json<UpdateOrderStatusRequest>,
) -> Result<Json<Order>, ApiError> {
    let repo = OrderRepository::new(state.pool.clone());
    let current: Order = repo
        .find_by_id(order_id)
        .await?
        .ok_or_else(order_not_found)?
        .into();

    if !current.status.can_transition_to(request.status) {
        return Err(ApiError::BadRequest(format!(
            "Cannot change order status from {} to {}",
            current.status, request.status
        )));
    }

    let order: Order = repo
        .update_status(order_id, current.status.as_str(), request.status.as_str())
        .await?
        .ok_or_else(|| ApiError::Conflict("Order status changed concurrently".into()))?
        .into();

    info!(
        order_id = %order.id,
        from = %current.status,
        to = %order.status,
        "Order status updated"
    );
    Ok(Json(order))
}

/// Set an order's payment status.
///
/// PATCH /api/admin/orders/:order_id/payment
pub async fn update_payment_status(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(request): Json<UpdatePaymentStatusRequest>,
) -> Result<Json<Order>, ApiError> {
    let order: Order = OrderRepository::new(state.pool.clone())
        .update_payment_status(order_id, request.payment_status.as_str())
        .await?
        .ok_or_else(order_not_found)?
        .into();

    info!(
        order_id = %order.id,
        payment_status = request.payment_status.as_str(),
        "Order payment status updated"
    );
    Ok(Json(order))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_errors_are_bad_requests() {
        let id = Uuid::new_v4();
        let err: ApiError = CheckoutError::ProductUnavailable(id).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let err: ApiError = CheckoutError::Overflow.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_row_not_found_is_not_a_unique_violation() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }
}
