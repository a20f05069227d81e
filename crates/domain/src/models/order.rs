//! Order domain models and status rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::validate_phone;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    OrderPlaced,
    Assigned,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::OrderPlaced => "order_placed",
            OrderStatus::Assigned => "assigned",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether an order may move from `self` to `next`.
    ///
    /// Orders only move forward; any non-terminal order may be cancelled.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (OrderPlaced, Assigned)
                | (Assigned, Shipped)
                | (Shipped, Delivered)
                | (OrderPlaced | Assigned | Shipped, Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "order_placed" => Ok(OrderStatus::OrderPlaced),
            "assigned" => Ok(OrderStatus::Assigned),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("Unknown order status: {}", other)),
        }
    }
}

/// Payment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "failed" => Ok(PaymentStatus::Failed),
            "refunded" => Ok(PaymentStatus::Refunded),
            other => Err(format!("Unknown payment status: {}", other)),
        }
    }
}

/// A priced line of an order. Name and price are snapshots taken at
/// checkout so later catalog edits do not change placed orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub unit_price: i64,
    pub quantity: i32,
    pub customization: Option<String>,
    pub line_total: i64,
}

/// Customer contact details captured at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 5, max = 500, message = "Address must be 5-500 characters"))]
    pub address: String,
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub customer: CustomerInfo,
    pub items: Vec<OrderItem>,
    pub subtotal: i64,
    pub total: i64,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One requested line in a checkout.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub product_id: Uuid,

    #[validate(range(min = 1, max = 100, message = "Quantity must be 1-100"))]
    pub quantity: i32,

    #[validate(length(max = 500, message = "Customization must be at most 500 characters"))]
    pub customization: Option<String>,
}

/// Request payload for placing an order.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[validate(nested)]
    pub customer: CustomerInfo,

    #[validate(length(min = 1, max = 50, message = "An order needs 1-50 items"))]
    #[validate(nested)]
    pub items: Vec<CheckoutItem>,

    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

/// Request payload for an admin status change.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// Request payload for an admin payment status change.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentStatusRequest {
    pub payment_status: PaymentStatus,
}

/// Query parameters for admin order listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Query parameters for customer order tracking.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackOrderQuery {
    pub phone: String,
}

/// Builds an order number of the form `ORD-YYYYMMDD-XXXXXX`.
pub fn generate_order_number(now: DateTime<Utc>) -> String {
    format!(
        "ORD-{}-{}",
        now.format("%Y%m%d"),
        shared::crypto::generate_code(6)
    )
}
