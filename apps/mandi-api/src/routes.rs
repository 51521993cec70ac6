use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::error;

use mandi_service::{CategoryPageRequest, Error as ServiceError, ProductQueryRequest};

use crate::state::AppState;

// Catalog and rating data change infrequently relative to read volume, so
// responses carry public cache hints with stale-while-revalidate.
const PRODUCTS_CACHE_CONTROL: &str = "public, s-maxage=1200, stale-while-revalidate=2400";
const CATEGORIES_CACHE_CONTROL: &str = "public, s-maxage=600, stale-while-revalidate=1200";
const CATEGORY_PAGE_CACHE_CONTROL: &str = "public, s-maxage=300, stale-while-revalidate=600";

/// Set when rating enrichment was skipped and every rating in the response
/// is a zeroed default.
pub const RATINGS_DEGRADED_HEADER: &str = "x-ratings-degraded";

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/catalog/products", get(products))
		.route("/v1/catalog/categories", get(categories))
		.route("/v1/catalog/categories/{category}/products", get(category_page))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn products(
	State(state): State<AppState>,
	Query(params): Query<ProductQueryRequest>,
) -> Result<Response, ApiError> {
	let response = state.service.query_products(params).await?;
	let mut reply = Json(response.items).into_response();

	reply
		.headers_mut()
		.insert(header::CACHE_CONTROL, HeaderValue::from_static(PRODUCTS_CACHE_CONTROL));

	if response.ratings_degraded {
		reply.headers_mut().insert(RATINGS_DEGRADED_HEADER, HeaderValue::from_static("1"));
	}

	Ok(reply)
}

async fn categories(State(state): State<AppState>) -> Result<Response, ApiError> {
	let response = state.service.categories().await?;
	let mut reply = Json(response.categories).into_response();

	reply
		.headers_mut()
		.insert(header::CACHE_CONTROL, HeaderValue::from_static(CATEGORIES_CACHE_CONTROL));

	Ok(reply)
}

async fn category_page(
	State(state): State<AppState>,
	Path(category): Path<String>,
	Query(params): Query<CategoryPageRequest>,
) -> Result<Response, ApiError> {
	let request = CategoryPageRequest { category, ..params };
	let response = state.service.category_page(request).await?;
	let degraded = response.ratings_degraded;
	let mut reply = Json(response).into_response();

	reply
		.headers_mut()
		.insert(header::CACHE_CONTROL, HeaderValue::from_static(CATEGORY_PAGE_CACHE_CONTROL));

	if degraded {
		reply.headers_mut().insert(RATINGS_DEGRADED_HEADER, HeaderValue::from_static("1"));
	}

	Ok(reply)
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: &'static str,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: &'static str,
	message: String,
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidArgument { message } => Self {
				status: StatusCode::BAD_REQUEST,
				error_code: "invalid_argument",
				message,
			},
			ServiceError::StoreUnavailable { message } => {
				// Log the store detail; the caller only sees a stable
				// classification.
				error!(%message, "Catalog request failed on store access.");

				Self {
					status: StatusCode::SERVICE_UNAVAILABLE,
					error_code: "store_unavailable",
					message: "Catalog store is unavailable.".to_string(),
				}
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
