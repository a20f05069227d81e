//! Order repository for database operations.

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::order::{CustomerInfo, OrderItem};

use crate::entities::OrderEntity;
use crate::metrics::QueryTimer;

const ORDER_COLUMNS: &str = "id, order_number, customer_name, customer_phone, customer_email, \
                             customer_address, items, subtotal, total, status, payment_status, \
                             notes, created_at, updated_at";

/// Values for a new order row.
#[derive(Debug, Clone)]
pub struct NewOrder<'a> {
    pub order_number: &'a str,
    pub customer: &'a CustomerInfo,
    pub items: &'a [OrderItem],
    pub subtotal: i64,
    pub total: i64,
    pub notes: Option<&'a str>,
}

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an order with status `order_placed` and payment `pending`.
    pub async fn create(&self, order: &NewOrder<'_>) -> Result<OrderEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_order");
        let result = sqlx::query_as::<_, OrderEntity>(&format!(
            r#"
            INSERT INTO orders (order_number, customer_name, customer_phone, customer_email,
                                customer_address, items, subtotal, total, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order.order_number)
        .bind(&order.customer.name)
        .bind(&order.customer.phone)
        .bind(&order.customer.email)
        .bind(&order.customer.address)
        .bind(Json(order.items))
        .bind(order.subtotal)
        .bind(order.total)
        .bind(order.notes)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<OrderEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_order_by_id");
        let result = sqlx::query_as::<_, OrderEntity>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Customer tracking lookup. Both values must match; the phone is
    /// compared in its normalized form.
    pub async fn find_by_number_and_phone(
        &self,
        order_number: &str,
        phone: &str,
    ) -> Result<Option<OrderEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_order_by_number_and_phone");
        let result = sqlx::query_as::<_, OrderEntity>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE order_number = $1 AND customer_phone = $2"
        ))
        .bind(order_number)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List one page of orders, newest first.
    pub async fn list(
        &self,
        status: Option<&str>,
        payment_status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<OrderEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_orders");
        let result = sqlx::query_as::<_, OrderEntity>(&format!(
            r#"
            SELECT {ORDER_COLUMNS} FROM orders
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR payment_status = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(status)
        .bind(payment_status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn count(
        &self,
        status: Option<&str>,
        payment_status: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_orders");
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM orders
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR payment_status = $2)
            "#,
        )
        .bind(status)
        .bind(payment_status)
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(count.0)
    }

    /// Move an order from `from` to `to`. Returns `None` when the order no
    /// longer has status `from`, so concurrent updates cannot skip a step.
    pub async fn update_status(
        &self,
        id: Uuid,
        from: &str,
        to: &str,
    ) -> Result<Option<OrderEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_order_status");
        let result = sqlx::query_as::<_, OrderEntity>(&format!(
            r#"
            UPDATE orders SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn update_payment_status(
        &self,
        id: Uuid,
        payment_status: &str,
    ) -> Result<Option<OrderEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_order_payment_status");
        let result = sqlx::query_as::<_, OrderEntity>(&format!(
            r#"
            UPDATE orders SET payment_status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(payment_status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
