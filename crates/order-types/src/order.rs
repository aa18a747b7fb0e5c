//! Order domain types.
//!
//! An order is a trackable unit of work with a pending/confirmed
//! lifecycle. Records are owned exclusively by the order store; every
//! type here is a snapshot handed out to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// A trackable unit of work that must be confirmed by resolving its
/// confirmation URL, typically by scanning the QR code that embeds it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	/// Unique identifier, generated at creation. Used as the store key
	/// and embedded in the confirmation URL.
	pub id: String,
	/// Free-text description supplied by the caller at creation.
	pub description: String,
	/// Current lifecycle status.
	pub status: OrderStatus,
	/// Timestamp set at creation.
	pub created_at: DateTime<Utc>,
	/// Set exactly once, at the moment the order transitions to
	/// confirmed. Absent while pending.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub confirmed_at: Option<DateTime<Utc>>,
	/// Absolute URL that confirms this order when resolved. Computed at
	/// creation and never regenerated, so it stays valid indefinitely.
	pub confirm_url: String,
}

/// Status of an order.
///
/// The only transition is `Pending -> Confirmed`, taken exactly once.
/// Confirming an already confirmed order is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
	/// Order has been created and awaits confirmation.
	Pending,
	/// Order has been confirmed. Terminal.
	Confirmed,
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrderStatus::Pending => write!(f, "pending"),
			OrderStatus::Confirmed => write!(f, "confirmed"),
		}
	}
}

/// Outcome of a confirmation attempt on an existing order.
#[derive(Debug, Clone)]
pub struct Confirmation {
	/// The order after the attempt, confirmed in either case.
	pub order: Order,
	/// True when the order had already been confirmed by an earlier
	/// call and this attempt changed nothing.
	pub already_confirmed: bool,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_order_serializes_camel_case() {
		let order = Order {
			id: "abc".to_string(),
			description: "test".to_string(),
			status: OrderStatus::Pending,
			created_at: Utc::now(),
			confirmed_at: None,
			confirm_url: "http://localhost:3000/orders/abc/confirm".to_string(),
		};

		let value = serde_json::to_value(&order).unwrap();
		assert_eq!(value["status"], "pending");
		assert_eq!(
			value["confirmUrl"],
			"http://localhost:3000/orders/abc/confirm"
		);
		assert!(value.get("createdAt").is_some());
		// Absent while pending, omitted from the wire shape entirely.
		assert!(value.get("confirmedAt").is_none());
	}

	#[test]
	fn test_confirmed_at_present_once_confirmed() {
		let order = Order {
			id: "abc".to_string(),
			description: "test".to_string(),
			status: OrderStatus::Confirmed,
			created_at: Utc::now(),
			confirmed_at: Some(Utc::now()),
			confirm_url: "http://localhost:3000/orders/abc/confirm".to_string(),
		};

		let value = serde_json::to_value(&order).unwrap();
		assert_eq!(value["status"], "confirmed");
		assert!(value.get("confirmedAt").is_some());
	}
}
