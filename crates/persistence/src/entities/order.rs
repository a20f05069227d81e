//! Order entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::order::{CustomerInfo, Order, OrderItem, OrderStatus, PaymentStatus};

/// Database row mapping for the orders table. Line items live in a JSONB
/// column since they are snapshots, not references.
#[derive(Debug, Clone, FromRow)]
pub struct OrderEntity {
    pub id: Uuid,
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub customer_address: String,
    pub items: Json<Vec<OrderItem>>,
    pub subtotal: i64,
    pub total: i64,
    pub status: String,
    pub payment_status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderEntity> for Order {
    fn from(entity: OrderEntity) -> Self {
        Self {
            id: entity.id,
            order_number: entity.order_number,
            customer: CustomerInfo {
                name: entity.customer_name,
                phone: entity.customer_phone,
                email: entity.customer_email,
                address: entity.customer_address,
            },
            items: entity.items.0,
            subtotal: entity.subtotal,
            total: entity.total,
            status: entity.status.parse().unwrap_or(OrderStatus::OrderPlaced),
            payment_status: entity
                .payment_status
                .parse()
                .unwrap_or(PaymentStatus::Pending),
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
