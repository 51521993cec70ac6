use axum::{
	body::{self, Body},
	http::{Request, StatusCode},
};
use tower::util::ServiceExt;

use mandi_api::{routes, state::AppState};
use mandi_config::{Catalog, Config, Postgres, Service, Storage};
use mandi_testkit::TestDatabase;

fn test_config(dsn: String) -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		storage: Storage { postgres: Postgres { dsn, pool_max_conns: 1 } },
		catalog: Catalog::default(),
	}
}

async fn test_state(test_db: &TestDatabase) -> AppState {
	let config = test_config(test_db.dsn().to_string());

	AppState::new(config).await.expect("Failed to initialize app state.")
}

async fn seed_product(state: &AppState, id: &str, title: &str, category: &str) {
	sqlx::query(
		"\
INSERT INTO products (product_id, title, category_name, price, is_active, is_draft)
VALUES ($1, $2, $3, 50.0, TRUE, FALSE)",
	)
	.bind(id)
	.bind(title)
	.bind(category)
	.execute(&state.service.db.pool)
	.await
	.expect("Failed to seed product.");
}

async fn read_json(response: axum::response::Response) -> serde_json::Value {
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");

	serde_json::from_slice(&bytes).expect("Failed to parse response.")
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set MANDI_PG_DSN to run."]
async fn health_ok() {
	let Some(base_dsn) = mandi_testkit::env_dsn() else {
		eprintln!("Skipping health_ok; set MANDI_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let state = test_state(&test_db).await;
	let app = routes::router(state);
	let response = app
		.oneshot(
			Request::builder().uri("/health").body(Body::empty()).expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /health.");

	assert_eq!(response.status(), StatusCode::OK);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set MANDI_PG_DSN to run."]
async fn products_carry_cache_hints_and_ratings() {
	let Some(base_dsn) = mandi_testkit::env_dsn() else {
		eprintln!("Skipping products_carry_cache_hints_and_ratings; set MANDI_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let state = test_state(&test_db).await;

	seed_product(&state, "42", "Hex bolt", "Fasteners").await;

	sqlx::query(
		"\
INSERT INTO reviews (product_id, order_id, user_id, rating, status)
VALUES ('/product/42', 'o1', 'u1', 4, 'approved'), ('42', 'o2', 'u1', 5, 'approved')",
	)
	.execute(&state.service.db.pool)
	.await
	.expect("Failed to seed reviews.");

	let app = routes::router(state);
	let response = app
		.oneshot(
			Request::builder()
				.uri("/v1/catalog/products?category=Fasteners&limit=20")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call products.");

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(
		response.headers().get("cache-control").and_then(|value| value.to_str().ok()),
		Some("public, s-maxage=1200, stale-while-revalidate=2400")
	);
	assert!(response.headers().get(routes::RATINGS_DEGRADED_HEADER).is_none());

	let json = read_json(response).await;
	let items = json.as_array().expect("Expected a product array.");

	assert_eq!(items.len(), 1);
	assert_eq!(items[0]["product_id"], "42");
	assert_eq!(items[0]["rating"], 4.5);
	assert_eq!(items[0]["reviewCount"], 2);
	assert_eq!(items[0]["delivery_option"], "Free Delivery Available");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set MANDI_PG_DSN to run."]
async fn negative_pagination_is_a_bad_request() {
	let Some(base_dsn) = mandi_testkit::env_dsn() else {
		eprintln!("Skipping negative_pagination_is_a_bad_request; set MANDI_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let state = test_state(&test_db).await;
	let app = routes::router(state);
	let response = app
		.oneshot(
			Request::builder()
				.uri("/v1/catalog/products?limit=-1")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call products.");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let json = read_json(response).await;

	assert_eq!(json["error_code"], "invalid_argument");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set MANDI_PG_DSN to run."]
async fn category_page_reports_pagination() {
	let Some(base_dsn) = mandi_testkit::env_dsn() else {
		eprintln!("Skipping category_page_reports_pagination; set MANDI_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let state = test_state(&test_db).await;

	for n in 0..25 {
		seed_product(&state, &format!("f{n}"), &format!("Hex bolt {n}"), "Fasteners").await;
	}

	let app = routes::router(state);
	let response = app
		.oneshot(
			Request::builder()
				.uri("/v1/catalog/categories/Fasteners/products?limit=20")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call category page.");

	assert_eq!(response.status(), StatusCode::OK);

	let json = read_json(response).await;

	assert_eq!(json["products"].as_array().map(Vec::len), Some(20));
	assert_eq!(json["totalCount"], 25);
	assert_eq!(json["pagination"]["totalPages"], 2);
	assert_eq!(json["pagination"]["hasNext"], true);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set MANDI_PG_DSN to run."]
async fn categories_list_is_sorted_and_cached() {
	let Some(base_dsn) = mandi_testkit::env_dsn() else {
		eprintln!("Skipping categories_list_is_sorted_and_cached; set MANDI_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let state = test_state(&test_db).await;

	seed_product(&state, "f1", "Hex bolt", "Fasteners").await;
	seed_product(&state, "a1", "Wood glue", "Adhesives").await;

	let app = routes::router(state);
	let response = app
		.oneshot(
			Request::builder()
				.uri("/v1/catalog/categories")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call categories.");

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(
		response.headers().get("cache-control").and_then(|value| value.to_str().ok()),
		Some("public, s-maxage=600, stale-while-revalidate=1200")
	);

	let json = read_json(response).await;

	assert_eq!(json, serde_json::json!(["Adhesives", "Fasteners"]));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
