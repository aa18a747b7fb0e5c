//! OpenAPI documentation for the QR order confirmation API.
//!
//! The generated document is served at `/api-docs/openapi.json` and
//! rendered by the Swagger UI mounted at `/docs`.

use utoipa::OpenApi;

use crate::server;

/// API documentation root.
#[derive(OpenApi)]
#[openapi(
	info(
		title = "QR Order Confirmation API",
		description = "Creates orders with scannable QR confirmation codes and tracks their pending/confirmed lifecycle."
	),
	paths(
		server::handle_health,
		server::handle_create_order,
		server::handle_list_orders,
		server::handle_confirm_order,
	),
	components(schemas(
		order_types::Order,
		order_types::OrderStatus,
		order_types::CreateOrderRequest,
		order_types::CreateOrderResponse,
		order_types::QrPayload,
		order_types::ListOrdersResponse,
		order_types::ErrorResponse,
		server::HealthResponse,
	)),
	tags(
		(name = "orders", description = "Order lifecycle and QR confirmation"),
		(name = "system", description = "Service health")
	)
)]
pub struct ApiDoc;
