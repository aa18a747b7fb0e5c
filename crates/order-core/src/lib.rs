//! Order orchestration for the QR order confirmation service.
//!
//! The `OrderService` is the only component that combines the order
//! store and the QR encoder into user-facing operations. It enforces
//! the create -> encode -> compensate protocol on creation and
//! delegates confirmation to the store without additional policy.

use base64::Engine;
use order_storage::{OrderStore, StoreError};
use order_types::{Confirmation, CreateOrderResponse, Order, QrPayload};
use qr_encoder::{EncodeError, QrEncoder};
use std::sync::Arc;
use thiserror::Error;

/// MIME type of every generated QR image.
const QR_MIME_TYPE: &str = "image/png";

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum ServiceError {
	/// Malformed input; nothing was stored.
	#[error("Validation failed: {0}")]
	Validation(String),
	/// QR generation failed; the tentatively stored order was rolled
	/// back.
	#[error("QR encoding failed: {0}")]
	Encoding(#[from] EncodeError),
	/// The confirmation target does not exist.
	#[error("Order not found: {0}")]
	NotFound(String),
	/// The store backend failed.
	#[error("Store error: {0}")]
	Store(#[from] StoreError),
}

/// Orchestrates the order store and the QR encoder.
///
/// The store is an injected handle; the service never owns global
/// state of its own.
pub struct OrderService {
	store: Arc<dyn OrderStore>,
	encoder: QrEncoder,
	base_url: String,
}

impl OrderService {
	/// Creates a service bound to an externally reachable base URL.
	///
	/// The base URL is supplied once at construction and reused for
	/// every confirmation URL; it is never re-derived per request.
	/// Trailing slashes are trimmed.
	pub fn new(
		store: Arc<dyn OrderStore>,
		encoder: QrEncoder,
		base_url: impl Into<String>,
	) -> Self {
		let base_url = base_url.into().trim_end_matches('/').to_string();
		Self {
			store,
			encoder,
			base_url,
		}
	}

	/// Creates an order and encodes its confirmation URL into a QR
	/// image.
	///
	/// When encoding fails, the tentatively stored order is deleted
	/// again before the error is surfaced, so no order without a
	/// scannable code is left behind. The rollback is best effort and
	/// not retried; if it fails too, the orphaned pending order is an
	/// accepted degraded outcome.
	pub async fn create_order_with_qr(
		&self,
		description: &str,
	) -> Result<CreateOrderResponse, ServiceError> {
		if description.is_empty() {
			return Err(ServiceError::Validation(
				"description must be a non-empty string".to_string(),
			));
		}

		let base_url = &self.base_url;
		let order = self
			.store
			.create(description.to_string(), &|id: &str| {
				format!("{}/orders/{}/confirm", base_url, id)
			})
			.await?;

		let image = match self.encoder.encode(&order.confirm_url) {
			Ok(image) => image,
			Err(err) => {
				if let Err(delete_err) = self.store.delete(&order.id).await {
					tracing::warn!(
						"Rollback of order {} failed, leaving an orphaned pending record: {}",
						order.id,
						delete_err
					);
				}
				return Err(ServiceError::Encoding(err));
			}
		};

		tracing::info!("Order {} created ({})", order.id, order.status);

		let qr = QrPayload {
			content: order.confirm_url.clone(),
			image_base64: base64::engine::general_purpose::STANDARD.encode(&image),
			mime_type: QR_MIME_TYPE.to_string(),
		};

		Ok(CreateOrderResponse { order, qr })
	}

	/// Confirms an order, idempotently.
	///
	/// Delegates to the store and maps an unknown id to `NotFound`.
	pub async fn confirm_order(&self, id: &str) -> Result<Confirmation, ServiceError> {
		let confirmation = self
			.store
			.confirm(id)
			.await?
			.ok_or_else(|| ServiceError::NotFound(id.to_string()))?;

		if confirmation.already_confirmed {
			tracing::info!("Order {} was already confirmed", confirmation.order.id);
		} else {
			tracing::info!("Order {} confirmed", confirmation.order.id);
		}

		Ok(confirmation)
	}

	/// Returns a snapshot of all stored orders.
	pub async fn list_orders(&self) -> Result<Vec<Order>, ServiceError> {
		Ok(self.store.list().await?)
	}

	/// Point lookup by id.
	pub async fn get_order(&self, id: &str) -> Result<Option<Order>, ServiceError> {
		Ok(self.store.get_by_id(id).await?)
	}
}
