//! HTTP server for the QR order confirmation API.
//!
//! Owns routing, request logging and response rendering. The core
//! only produces structured data; everything human-readable (the
//! confirmation pages) is rendered here.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::{Html, IntoResponse, Json},
	routing::{any, get},
	Router,
};
use chrono::{DateTime, Utc};
use order_config::ApiConfig;
use order_core::{OrderService, ServiceError};
use order_types::{
	ApiError, CreateOrderRequest, CreateOrderResponse, ErrorResponse, ListOrdersResponse,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Order orchestration service.
	pub orders: Arc<OrderService>,
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(handle_health))
		.route(
			"/orders",
			get(handle_list_orders).post(handle_create_order),
		)
		.route("/orders/{id}/confirm", any(handle_confirm_order))
		.merge(
			SwaggerUi::new("/docs")
				.url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()),
		)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(CorsLayer::permissive()),
		)
		.with_state(state)
}

/// Starts the HTTP server for the API.
pub async fn start_server(
	api_config: &ApiConfig,
	orders: Arc<OrderService>,
) -> Result<(), Box<dyn std::error::Error>> {
	let app = router(AppState { orders });

	let bind_address = api_config.bind_address();
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("QR order API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}

/// Health check response data.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct HealthResponse {
	/// Service liveness indicator.
	pub status: String,
	/// Current server time.
	pub timestamp: DateTime<Utc>,
}

/// Handles GET /health requests.
#[utoipa::path(
	get,
	path = "/health",
	responses(
		(status = 200, description = "Service healthy", body = HealthResponse)
	),
	tag = "system"
)]
pub(crate) async fn handle_health() -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "ok".to_string(),
		timestamp: Utc::now(),
	})
}

/// Handles POST /orders requests.
///
/// Creates a pending order and returns it together with the QR image
/// encoding its confirmation URL.
#[utoipa::path(
	post,
	path = "/orders",
	request_body = CreateOrderRequest,
	responses(
		(status = 201, description = "Order created", body = CreateOrderResponse),
		(status = 400, description = "Missing or empty description", body = ErrorResponse),
		(status = 500, description = "QR generation failed", body = ErrorResponse)
	),
	tag = "orders"
)]
pub(crate) async fn handle_create_order(
	State(state): State<AppState>,
	Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreateOrderResponse>), ApiError> {
	match state.orders.create_order_with_qr(&request.description).await {
		Ok(response) => Ok((StatusCode::CREATED, Json(response))),
		Err(e) => {
			tracing::warn!("Order creation failed: {}", e);
			Err(api_error(e))
		}
	}
}

/// Handles GET /orders requests.
#[utoipa::path(
	get,
	path = "/orders",
	responses(
		(status = 200, description = "All stored orders", body = ListOrdersResponse)
	),
	tag = "orders"
)]
pub(crate) async fn handle_list_orders(
	State(state): State<AppState>,
) -> Result<Json<ListOrdersResponse>, ApiError> {
	let data = state.orders.list_orders().await.map_err(api_error)?;
	Ok(Json(ListOrdersResponse {
		total: data.len(),
		data,
	}))
}

/// Handles /orders/{id}/confirm requests.
///
/// This is the endpoint QR scanners resolve, so it accepts any method
/// and answers with human-readable pages rather than JSON.
#[utoipa::path(
	get,
	path = "/orders/{id}/confirm",
	params(
		("id" = String, Path, description = "Order identifier")
	),
	responses(
		(status = 200, description = "Order confirmed, or was already confirmed"),
		(status = 404, description = "Unknown order")
	),
	tag = "orders"
)]
pub(crate) async fn handle_confirm_order(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> axum::response::Response {
	match state.orders.confirm_order(&id).await {
		Ok(confirmation) => {
			let order = &confirmation.order;
			let page = if confirmation.already_confirmed {
				format!(
					"<h1>Order already confirmed</h1><p>ID: {}</p><p>{}</p>",
					order.id, order.description
				)
			} else {
				format!(
					"<h1>Order confirmed</h1><p>ID: {}</p><p>{}</p><p>Status: {}</p>",
					order.id, order.description, order.status
				)
			};
			(StatusCode::OK, Html(page)).into_response()
		}
		Err(ServiceError::NotFound(_)) => (
			StatusCode::NOT_FOUND,
			Html("<h1>Order not found</h1>".to_string()),
		)
			.into_response(),
		Err(e) => {
			tracing::warn!("Order confirmation failed: {}", e);
			api_error(e).into_response()
		}
	}
}

/// Maps core service errors onto the API error taxonomy.
fn api_error(err: ServiceError) -> ApiError {
	match err {
		ServiceError::Validation(message) => ApiError::BadRequest {
			error_type: "VALIDATION_ERROR".to_string(),
			message,
		},
		ServiceError::Encoding(_) => ApiError::InternalServerError {
			error_type: "QR_ENCODING_FAILED".to_string(),
			message: "Could not generate the QR code".to_string(),
		},
		ServiceError::NotFound(id) => ApiError::NotFound {
			error_type: "ORDER_NOT_FOUND".to_string(),
			message: format!("Order not found: {}", id),
		},
		ServiceError::Store(e) => ApiError::InternalServerError {
			error_type: "STORE_ERROR".to_string(),
			message: e.to_string(),
		},
	}
}
