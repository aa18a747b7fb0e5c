//! Order storage for the QR order confirmation service.
//!
//! This crate provides the authoritative, process-lifetime-scoped
//! keeper of all orders behind a backend trait, together with an
//! in-memory implementation. The store is handed into the service
//! layer as an explicit handle, never reached through a module-level
//! singleton.

use async_trait::async_trait;
use order_types::{Confirmation, Order};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod memory;
}

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
	/// Error that occurs in the storage backend.
	#[error("Backend error: {0}")]
	Backend(String),
}

/// Builder invoked with the freshly generated id to derive an order's
/// confirmation URL before the record is stored.
pub type ConfirmUrlBuilder<'a> = &'a (dyn Fn(&str) -> String + Send + Sync);

/// Trait defining the interface for order store backends.
///
/// The store exclusively owns all order records; every operation
/// returns snapshots, never references into the store. Implementations
/// must execute each operation atomically so that confirmation is
/// linearizable per id: of two concurrent confirmations for the same
/// order, exactly one observes `already_confirmed = false`.
#[async_trait]
pub trait OrderStore: Send + Sync {
	/// Creates and stores a new pending order.
	///
	/// Generates a fresh unique id, derives the confirmation URL
	/// through `build_confirm_url`, stamps the creation time and
	/// returns a full snapshot of the stored record. Description
	/// validation is the caller's responsibility; the store only
	/// requires an id-keyable record.
	async fn create(
		&self,
		description: String,
		build_confirm_url: ConfirmUrlBuilder<'_>,
	) -> Result<Order, StoreError>;

	/// Returns a snapshot of all stored orders in insertion order.
	///
	/// The ordering is for display only; callers must not rely on it
	/// for correctness.
	async fn list(&self) -> Result<Vec<Order>, StoreError>;

	/// Point lookup by id. An absent order is a valid, non-error
	/// outcome.
	async fn get_by_id(&self, id: &str) -> Result<Option<Order>, StoreError>;

	/// Transitions an order to confirmed, idempotently.
	///
	/// Returns `None` when no order with `id` exists. A pending order
	/// is marked confirmed with the confirmation time set; an already
	/// confirmed order is returned unchanged with `already_confirmed`
	/// set. Repeated calls never error and never advance the
	/// confirmation time twice.
	async fn confirm(&self, id: &str) -> Result<Option<Confirmation>, StoreError>;

	/// Removes a record.
	///
	/// Used only as a compensating action when a creation fails
	/// downstream; never exposed as a public lifecycle operation.
	async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
