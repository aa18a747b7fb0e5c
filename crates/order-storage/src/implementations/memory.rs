//! In-memory order store backend.
//!
//! Keeps all orders in a HashMap guarded by a read-write lock. State
//! is scoped to the process lifetime; nothing survives a restart.

use crate::{ConfirmUrlBuilder, OrderStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use order_types::{Confirmation, Order, OrderStatus};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Store contents. The insertion log preserves creation order for
/// listing.
#[derive(Default)]
struct Inner {
	orders: HashMap<String, Order>,
	insertion: Vec<String>,
}

/// In-memory order store.
///
/// Every operation holds the lock for its whole read-modify-write, so
/// two concurrent confirmations of the same id observe exactly one
/// `already_confirmed = false`.
pub struct MemoryOrderStore {
	inner: Arc<RwLock<Inner>>,
}

impl MemoryOrderStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self {
			inner: Arc::new(RwLock::new(Inner::default())),
		}
	}
}

impl Default for MemoryOrderStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
	async fn create(
		&self,
		description: String,
		build_confirm_url: ConfirmUrlBuilder<'_>,
	) -> Result<Order, StoreError> {
		let mut inner = self.inner.write().await;

		// A v4 collision is vanishingly unlikely; regenerate rather
		// than overwrite an existing record.
		let mut id = Uuid::new_v4().to_string();
		while inner.orders.contains_key(&id) {
			id = Uuid::new_v4().to_string();
		}

		let order = Order {
			confirm_url: build_confirm_url(&id),
			id: id.clone(),
			description,
			status: OrderStatus::Pending,
			created_at: Utc::now(),
			confirmed_at: None,
		};

		inner.orders.insert(id.clone(), order.clone());
		inner.insertion.push(id);
		Ok(order)
	}

	async fn list(&self) -> Result<Vec<Order>, StoreError> {
		let inner = self.inner.read().await;
		Ok(inner
			.insertion
			.iter()
			.filter_map(|id| inner.orders.get(id).cloned())
			.collect())
	}

	async fn get_by_id(&self, id: &str) -> Result<Option<Order>, StoreError> {
		let inner = self.inner.read().await;
		Ok(inner.orders.get(id).cloned())
	}

	async fn confirm(&self, id: &str) -> Result<Option<Confirmation>, StoreError> {
		let mut inner = self.inner.write().await;

		let Some(order) = inner.orders.get_mut(id) else {
			return Ok(None);
		};

		let already_confirmed = order.status == OrderStatus::Confirmed;
		if !already_confirmed {
			// The status and confirmation time only ever change
			// together.
			order.status = OrderStatus::Confirmed;
			order.confirmed_at = Some(Utc::now());
		}

		Ok(Some(Confirmation {
			order: order.clone(),
			already_confirmed,
		}))
	}

	async fn delete(&self, id: &str) -> Result<(), StoreError> {
		let mut inner = self.inner.write().await;
		inner.orders.remove(id);
		inner.insertion.retain(|stored| stored != id);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	fn confirm_url(id: &str) -> String {
		format!("http://localhost:3000/orders/{}/confirm", id)
	}

	#[tokio::test]
	async fn test_create_and_get() {
		let store = MemoryOrderStore::new();

		let order = store
			.create("credential delivery".to_string(), &confirm_url)
			.await
			.unwrap();

		assert_eq!(order.status, OrderStatus::Pending);
		assert!(order.confirmed_at.is_none());
		assert_eq!(order.confirm_url, confirm_url(&order.id));

		let fetched = store.get_by_id(&order.id).await.unwrap().unwrap();
		assert_eq!(fetched.id, order.id);
		assert_eq!(fetched.description, "credential delivery");
	}

	#[tokio::test]
	async fn test_get_missing_order_is_none() {
		let store = MemoryOrderStore::new();
		let result = store.get_by_id("no-such-id").await.unwrap();
		assert!(result.is_none());
	}

	#[tokio::test]
	async fn test_created_ids_are_unique() {
		let store = MemoryOrderStore::new();

		let mut ids = HashSet::new();
		for n in 0..100 {
			let order = store
				.create(format!("order {}", n), &confirm_url)
				.await
				.unwrap();
			ids.insert(order.id);
		}

		assert_eq!(ids.len(), 100);
	}

	#[tokio::test]
	async fn test_confirm_is_idempotent() {
		let store = MemoryOrderStore::new();
		let order = store
			.create("confirm me".to_string(), &confirm_url)
			.await
			.unwrap();

		let first = store.confirm(&order.id).await.unwrap().unwrap();
		assert!(!first.already_confirmed);
		assert_eq!(first.order.status, OrderStatus::Confirmed);
		let confirmed_at = first.order.confirmed_at.unwrap();

		let second = store.confirm(&order.id).await.unwrap().unwrap();
		assert!(second.already_confirmed);
		assert_eq!(second.order.confirmed_at.unwrap(), confirmed_at);
	}

	#[tokio::test]
	async fn test_confirm_missing_order_is_none() {
		let store = MemoryOrderStore::new();
		let result = store.confirm("no-such-id").await.unwrap();
		assert!(result.is_none());
	}

	#[tokio::test]
	async fn test_delete_removes_order() {
		let store = MemoryOrderStore::new();
		let order = store
			.create("rolled back".to_string(), &confirm_url)
			.await
			.unwrap();

		store.delete(&order.id).await.unwrap();

		assert!(store.get_by_id(&order.id).await.unwrap().is_none());
		assert!(store.list().await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_list_preserves_insertion_order() {
		let store = MemoryOrderStore::new();

		let first = store.create("first".to_string(), &confirm_url).await.unwrap();
		let second = store
			.create("second".to_string(), &confirm_url)
			.await
			.unwrap();
		let third = store.create("third".to_string(), &confirm_url).await.unwrap();

		let listed = store.list().await.unwrap();
		let ids: Vec<&str> = listed.iter().map(|order| order.id.as_str()).collect();
		assert_eq!(
			ids,
			vec![first.id.as_str(), second.id.as_str(), third.id.as_str()]
		);
	}
}
