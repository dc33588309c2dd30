//! REST integration test macro for venue stores.
//!
//! The `rest_integration_tests!` macro generates HTTP-level tests that run a
//! `VenueStore` through full REST round-trips:
//! JSON → HTTP request → handler → VenueService → store → HTTP response → JSON.

/// Generate a REST integration test suite for a store backend.
///
/// `$factory` must produce an `impl VenueStore + 'static`.
///
/// # Generated Tests
///
/// ## CRUD
/// - `test_rest_create` — POST 201 + generated id
/// - `test_rest_get` — GET 200 + stored document
/// - `test_rest_replace` — PUT 200, omitted fields are gone
/// - `test_rest_delete` — DELETE 200 with previous state, then GET 404
///
/// ## Search
/// - `test_rest_min_stars` — threshold includes and excludes
/// - `test_rest_proximity` — nearest first within 10 km
///
/// ## Appends
/// - `test_rest_comment_date_is_server_time`
/// - `test_rest_rate`
///
/// ## Error handling
/// - unknown id → 404, garbage id → 400, bad parameters or bodies → 400,
///   always with an `{"error": ...}` body
#[macro_export]
macro_rules! rest_integration_tests {
    ($factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::{TestResponse, TestServer};
            use serde_json::{Value, json};

            async fn make_server() -> TestServer {
                let router = build_test_router($factory);
                TestServer::new(router)
            }

            async fn create(server: &TestServer, body: Value) -> Value {
                let response = server.post("/restaurants").json(&body).await;
                response.assert_status(StatusCode::CREATED);
                response.json()
            }

            fn assert_error(response: &TestResponse, status: StatusCode) {
                response.assert_status(status);
                let body: Value = response.json();
                let message = body["error"].as_str().expect("error body");
                assert!(!message.is_empty());
                assert_eq!(body.as_object().map(|o| o.len()), Some(1));
            }

            // ==============================================================
            // CRUD
            // ==============================================================

            #[tokio::test]
            async fn test_rest_create() {
                let server = make_server().await;

                let body = create(
                    &server,
                    json!({
                        "name": "Cafe Sol",
                        "contact": {
                            "phone": "+34 600 111 222",
                            "email": "hola@cafesol.es",
                            "location": [2.17, 41.38]
                        },
                        "stars": 4,
                        "categories": ["cafe"]
                    }),
                )
                .await;

                uuid::Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();
                assert_eq!(body["name"], "Cafe Sol");
                assert_eq!(body["contact"]["location"], json!([2.17, 41.38]));
                assert_eq!(body["stars"], 4.0);
                assert_eq!(body["categories"], json!(["cafe"]));
                assert_eq!(body["comments"], json!([]));
                assert_eq!(body["rates"], json!([]));
            }

            #[tokio::test]
            async fn test_rest_create_with_partial_embedded_elements() {
                let server = make_server().await;

                let body = create(
                    &server,
                    json!({
                        "name": "Sol",
                        "comments": [{ "text": "hi" }],
                        "rates": [{ "date": "2024-05-01T10:00:00Z" }]
                    }),
                )
                .await;

                assert_eq!(body["comments"][0]["text"], "hi");
                assert_eq!(body["comments"][0]["user"], "");
                assert!(body["comments"][0]["date"].is_string());
                assert!(body["rates"][0].get("stars").is_none());

                let id = body["id"].as_str().unwrap();
                let fetched: Value = server.get(&format!("/restaurants/{}", id)).await.json();
                assert_eq!(fetched, body);
            }

            #[tokio::test]
            async fn test_rest_get() {
                let server = make_server().await;
                let created = create(&server, json!({"name": "Luna", "stars": 3})).await;
                let id = created["id"].as_str().unwrap();

                let response = server.get(&format!("/restaurants/{}", id)).await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(body, created);
            }

            #[tokio::test]
            async fn test_rest_list_all() {
                let server = make_server().await;
                create(&server, json!({"name": "Cafe Sol"})).await;
                create(&server, json!({"name": "Luna"})).await;

                let response = server.get("/restaurants").await;
                response.assert_status_ok();

                let body: Vec<Value> = response.json();
                assert_eq!(body.len(), 2);
            }

            #[tokio::test]
            async fn test_rest_replace() {
                let server = make_server().await;
                let created = create(
                    &server,
                    json!({"name": "Cafe Sol", "stars": 4, "categories": ["cafe"]}),
                )
                .await;
                let id = created["id"].as_str().unwrap();

                let response = server
                    .put(&format!("/restaurants/{}", id))
                    .json(&json!({"name": "Cafe Sol y Luna"}))
                    .await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(body["id"], id);
                assert_eq!(body["name"], "Cafe Sol y Luna");
                assert_eq!(body["categories"], json!([]));
                assert!(body.get("stars").is_none());
            }

            #[tokio::test]
            async fn test_rest_replace_unknown() {
                let server = make_server().await;
                let response = server
                    .put(&format!("/restaurants/{}", uuid::Uuid::new_v4()))
                    .json(&json!({"name": "ghost"}))
                    .await;
                assert_error(&response, StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_rest_delete() {
                let server = make_server().await;
                let created = create(&server, json!({"name": "Cafe Sol"})).await;
                let id = created["id"].as_str().unwrap();

                let response = server.delete(&format!("/restaurants/{}", id)).await;
                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body, created);

                let response = server.get(&format!("/restaurants/{}", id)).await;
                assert_error(&response, StatusCode::NOT_FOUND);

                let response = server.delete(&format!("/restaurants/{}", id)).await;
                assert_error(&response, StatusCode::NOT_FOUND);
            }

            // ==============================================================
            // Search
            // ==============================================================

            #[tokio::test]
            async fn test_rest_min_stars() {
                let server = make_server().await;
                let created = create(
                    &server,
                    json!({"name": "Cafe Sol", "stars": 4, "categories": ["cafe"]}),
                )
                .await;

                let response = server.get("/restaurants?minStars=3").await;
                response.assert_status_ok();
                let body: Vec<Value> = response.json();
                assert_eq!(body.len(), 1);
                assert_eq!(body[0]["id"], created["id"]);

                let response = server.get("/restaurants?minStars=5").await;
                response.assert_status_ok();
                let body: Vec<Value> = response.json();
                assert!(body.is_empty());
            }

            #[tokio::test]
            async fn test_rest_min_stars_not_a_number() {
                let server = make_server().await;
                let response = server.get("/restaurants?minStars=abc").await;
                assert_error(&response, StatusCode::BAD_REQUEST);
            }

            #[tokio::test]
            async fn test_rest_empty_parameter_is_ignored() {
                let server = make_server().await;
                create(&server, json!({"name": "Cafe Sol"})).await;

                let response = server.get("/restaurants?name=&minStars=").await;
                response.assert_status_ok();
                let body: Vec<Value> = response.json();
                assert_eq!(body.len(), 1);
            }

            #[tokio::test]
            async fn test_rest_name_and_category() {
                let server = make_server().await;
                let sol = create(
                    &server,
                    json!({"name": "Cafe Sol", "categories": ["cafe", "brunch"]}),
                )
                .await;
                create(&server, json!({"name": "Sol Bar", "categories": ["bar"]})).await;

                let response = server.get("/restaurants?name=sol&category=BRUNCH").await;
                response.assert_status_ok();
                let body: Vec<Value> = response.json();
                assert_eq!(body.len(), 1);
                assert_eq!(body[0]["id"], sol["id"]);
            }

            #[tokio::test]
            async fn test_rest_proximity() {
                let server = make_server().await;
                create(&server, json!({"name": "far", "contact": {"location": [2.23, 41.42]}})).await;
                create(&server, json!({"name": "outside", "contact": {"location": [3.5, 42.0]}})).await;
                create(&server, json!({"name": "near", "contact": {"location": [2.171, 41.381]}})).await;

                let response = server
                    .get("/restaurants?longitude=2.17&latitude=41.38")
                    .await;
                response.assert_status_ok();

                let body: Vec<Value> = response.json();
                let names: Vec<&str> = body.iter().filter_map(|v| v["name"].as_str()).collect();
                assert_eq!(names, vec!["near", "far"]);
            }

            #[tokio::test]
            async fn test_rest_coordinate_out_of_range() {
                let server = make_server().await;
                let response = server
                    .get("/restaurants?longitude=200&latitude=41.38")
                    .await;
                assert_error(&response, StatusCode::BAD_REQUEST);
            }

            // ==============================================================
            // Appends
            // ==============================================================

            #[tokio::test]
            async fn test_rest_comment_date_is_server_time() {
                let server = make_server().await;
                let created = create(&server, json!({"name": "Cafe Sol"})).await;
                let id = created["id"].as_str().unwrap();

                let before = chrono::Utc::now();
                let response = server
                    .post(&format!("/restaurants/{}/comments", id))
                    .json(&json!({
                        "user": "ana",
                        "text": "great",
                        "date": "2001-01-01T00:00:00Z"
                    }))
                    .await;
                response.assert_status_ok();

                let body: Value = response.json();
                let comments = body["comments"].as_array().unwrap();
                assert_eq!(comments.len(), 1);
                assert_eq!(comments[0]["user"], "ana");
                assert_eq!(comments[0]["text"], "great");

                let date: chrono::DateTime<chrono::Utc> =
                    comments[0]["date"].as_str().unwrap().parse().unwrap();
                assert!(date >= before);
            }

            #[tokio::test]
            async fn test_rest_rate() {
                let server = make_server().await;
                let created = create(&server, json!({"name": "Cafe Sol"})).await;
                let id = created["id"].as_str().unwrap();

                let response = server
                    .post(&format!("/restaurants/{}/rates", id))
                    .json(&json!({"stars": 5}))
                    .await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(body["rates"][0]["stars"], 5.0);
                assert!(body["rates"][0]["date"].is_string());
                assert_eq!(body["comments"], json!([]));
            }

            #[tokio::test]
            async fn test_rest_rate_unknown_venue() {
                let server = make_server().await;
                let response = server
                    .post(&format!("/restaurants/{}/rates", uuid::Uuid::new_v4()))
                    .json(&json!({"stars": 5}))
                    .await;
                assert_error(&response, StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_rest_comment_missing_text() {
                let server = make_server().await;
                let created = create(&server, json!({"name": "Cafe Sol"})).await;
                let id = created["id"].as_str().unwrap();

                let response = server
                    .post(&format!("/restaurants/{}/comments", id))
                    .json(&json!({"user": "ana"}))
                    .await;
                assert_error(&response, StatusCode::BAD_REQUEST);
            }

            // ==============================================================
            // Error handling
            // ==============================================================

            #[tokio::test]
            async fn test_rest_error_not_found() {
                let server = make_server().await;
                let response = server
                    .get(&format!("/restaurants/{}", uuid::Uuid::new_v4()))
                    .await;
                assert_error(&response, StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_rest_error_invalid_id() {
                let server = make_server().await;
                let response = server.get("/restaurants/not-a-uuid").await;
                assert_error(&response, StatusCode::BAD_REQUEST);
            }

            #[tokio::test]
            async fn test_rest_error_body_not_json() {
                let server = make_server().await;
                let response = server.post("/restaurants").text("name=Cafe Sol").await;
                assert_error(&response, StatusCode::BAD_REQUEST);
            }

            #[tokio::test]
            async fn test_rest_error_location_out_of_range() {
                let server = make_server().await;
                let response = server
                    .post("/restaurants")
                    .json(&json!({"name": "Nowhere", "contact": {"location": [2.17, 95.0]}}))
                    .await;
                assert_error(&response, StatusCode::BAD_REQUEST);

                let response = server.get("/restaurants").await;
                let body: Vec<Value> = response.json();
                assert!(body.is_empty());
            }

            #[tokio::test]
            async fn test_rest_health() {
                let server = make_server().await;
                let response = server.get("/health").await;
                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["status"], "ok");
            }
        }
    };
}
