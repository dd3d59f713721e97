//! Order Store

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::{
    customer::normalize_phone,
    orders::models::{FulfillmentStatus, NewOrder, OrderId, OrderRecord, PaymentStatus},
};

/// Order store error variants.
#[derive(Debug, Error)]
pub enum OrderStoreError {
    /// Order was not found.
    #[error("order {0} not found")]
    NotFound(OrderId),

    /// An order with this id already exists.
    #[error("order {0} already exists")]
    AlreadyExists(OrderId),

    /// The backing store could not be reached.
    #[error("order store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence for submitted orders.
#[automock]
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Store a new order and return the record with its id and initial statuses.
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrderStoreError>;

    /// All orders, newest first.
    async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrderStoreError>;

    /// Retrieve a single order.
    async fn get_order(&self, id: OrderId) -> Result<OrderRecord, OrderStoreError>;

    /// Orders placed with a phone number, newest first. Separators are ignored.
    async fn orders_by_phone(&self, phone: String) -> Result<Vec<OrderRecord>, OrderStoreError>;

    /// Move an order to any fulfillment status.
    async fn update_status(
        &self,
        id: OrderId,
        status: FulfillmentStatus,
    ) -> Result<OrderRecord, OrderStoreError>;

    /// Record payment for an order.
    async fn mark_paid(&self, id: OrderId) -> Result<OrderRecord, OrderStoreError>;
}

/// Process-local store, kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<OrderRecord>>,
}

impl InMemoryOrderStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    async fn modify(
        &self,
        id: OrderId,
        apply: impl FnOnce(&mut OrderRecord) + Send,
    ) -> Result<OrderRecord, OrderStoreError> {
        let mut orders = self.orders.write().await;

        let record = orders
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(OrderStoreError::NotFound(id))?;

        apply(record);
        record.updated_at = Timestamp::now();

        Ok(record.clone())
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    #[tracing::instrument(skip_all, fields(method = ?order.delivery_method))]
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrderStoreError> {
        let record = OrderRecord::new(order, Timestamp::now());
        let mut orders = self.orders.write().await;

        if orders.iter().any(|existing| existing.id == record.id) {
            return Err(OrderStoreError::AlreadyExists(record.id));
        }

        info!(id = %record.id, grand_total = record.order.grand_total, "order created");

        orders.push(record.clone());

        Ok(record)
    }

    async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrderStoreError> {
        Ok(self.orders.read().await.iter().rev().cloned().collect())
    }

    async fn get_order(&self, id: OrderId) -> Result<OrderRecord, OrderStoreError> {
        self.orders
            .read()
            .await
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or(OrderStoreError::NotFound(id))
    }

    async fn orders_by_phone(&self, phone: String) -> Result<Vec<OrderRecord>, OrderStoreError> {
        let phone = normalize_phone(&phone);

        Ok(self
            .orders
            .read()
            .await
            .iter()
            .rev()
            .filter(|record| normalize_phone(&record.order.customer.phone) == phone)
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn update_status(
        &self,
        id: OrderId,
        status: FulfillmentStatus,
    ) -> Result<OrderRecord, OrderStoreError> {
        let record = self.modify(id, |record| record.status = status).await?;

        debug!("status updated");

        Ok(record)
    }

    #[tracing::instrument(skip(self))]
    async fn mark_paid(&self, id: OrderId) -> Result<OrderRecord, OrderStoreError> {
        let record = self
            .modify(id, |record| record.payment_status = PaymentStatus::Paid)
            .await?;

        debug!("payment recorded");

        Ok(record)
    }
}
