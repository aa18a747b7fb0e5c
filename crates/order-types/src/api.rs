//! API types for the order confirmation HTTP API.
//!
//! This module defines the request and response types for the API
//! endpoints, plus the structured error type handlers convert into
//! JSON error responses.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::Order;

/// Body of `POST /orders`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
	/// Free-text description of the order. Must be non-empty.
	pub description: String,
}

/// QR image payload returned alongside a created order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
	/// The exact text encoded in the symbol: the confirmation URL.
	pub content: String,
	/// PNG image bytes, base64 encoded for JSON transport.
	pub image_base64: String,
	/// MIME type of the decoded image. Always `image/png`.
	pub mime_type: String,
}

/// Response of `POST /orders`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderResponse {
	/// Snapshot of the stored order.
	pub order: Order,
	/// The QR image encoding the order's confirmation URL.
	pub qr: QrPayload,
}

/// Response of `GET /orders`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListOrdersResponse {
	/// Number of stored orders.
	pub total: usize,
	/// Snapshot of all orders, in insertion order.
	pub data: Vec<Order>,
}

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
	/// Error type/code.
	pub error: String,
	/// Human-readable description.
	pub message: String,
}

/// Structured API error type with appropriate HTTP status mapping.
#[derive(Debug)]
pub enum ApiError {
	/// Bad request with validation errors (400)
	BadRequest { error_type: String, message: String },
	/// Requested resource does not exist (404)
	NotFound { error_type: String, message: String },
	/// Internal server error (500)
	InternalServerError { error_type: String, message: String },
}

impl ApiError {
	/// Get the HTTP status code for this error.
	pub fn status_code(&self) -> u16 {
		match self {
			ApiError::BadRequest { .. } => 400,
			ApiError::NotFound { .. } => 404,
			ApiError::InternalServerError { .. } => 500,
		}
	}

	/// Convert to ErrorResponse for JSON serialization.
	pub fn to_error_response(&self) -> ErrorResponse {
		match self {
			ApiError::BadRequest {
				error_type,
				message,
			}
			| ApiError::NotFound {
				error_type,
				message,
			}
			| ApiError::InternalServerError {
				error_type,
				message,
			} => ErrorResponse {
				error: error_type.clone(),
				message: message.clone(),
			},
		}
	}
}

impl fmt::Display for ApiError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ApiError::BadRequest { message, .. } => write!(f, "Bad Request: {}", message),
			ApiError::NotFound { message, .. } => write!(f, "Not Found: {}", message),
			ApiError::InternalServerError { message, .. } => {
				write!(f, "Internal Server Error: {}", message)
			}
		}
	}
}

impl std::error::Error for ApiError {}

impl axum::response::IntoResponse for ApiError {
	fn into_response(self) -> axum::response::Response {
		use axum::{http::StatusCode, response::Json};

		let status = match self.status_code() {
			400 => StatusCode::BAD_REQUEST,
			404 => StatusCode::NOT_FOUND,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		};

		let error_response = self.to_error_response();
		(status, Json(error_response)).into_response()
	}
}
