use super::*;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn test_app(graphhopper_url: &str, timeout_secs: u64) -> Router {
    let pool = routeplan_db::connect_in_memory()
        .await
        .expect("in-memory pool");
    let graphhopper = GraphHopperClient::with_base_url("test-key", timeout_secs, graphhopper_url)
        .expect("graphhopper client");
    build_app(AppState {
        pool,
        graphhopper: Arc::new(graphhopper),
        max_point_spread_deg: 10.0,
    })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).expect("json parse")
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn delete_req(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

async fn mount_hit(server: &MockServer, query: &str, lat: f64, lng: f64) {
    Mock::given(method("GET"))
        .and(path("/geocode"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "hits": [{"point": {"lat": lat, "lng": lng}, "name": query, "country": "Philippines"}]
        })))
        .mount(server)
        .await;
}

async fn mount_no_hits(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/geocode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"hits": []})))
        .mount(server)
        .await;
}

fn manila_tagaytay_path() -> serde_json::Value {
    serde_json::json!({
        "paths": [{
            "distance": 55_200.0,
            "time": 5_025_000,
            "points": {
                "type": "LineString",
                "coordinates": [[120.9842, 14.5995], [120.97, 14.40], [120.9600, 14.1153]]
            },
            "instructions": [
                {"text": "Head south on Roxas Boulevard", "distance": 1_200.0, "interval": [0, 1], "time": 60_000, "sign": 0},
                {"text": "Continue onto Aguinaldo Highway", "distance": 54_000.0, "interval": [1, 2], "time": 4_965_000, "sign": 0},
                {"text": "Arrive at destination", "distance": 0.0, "interval": [2, 2], "time": 0, "sign": 4}
            ]
        }]
    })
}

#[test]
fn api_error_codes_map_to_statuses() {
    let cases = [
        ("validation_error", StatusCode::BAD_REQUEST),
        ("no_route", StatusCode::BAD_REQUEST),
        ("not_found", StatusCode::NOT_FOUND),
        ("upstream_timeout", StatusCode::GATEWAY_TIMEOUT),
        ("upstream_error", StatusCode::BAD_GATEWAY),
        ("internal_error", StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (code, expected) in cases {
        let response = ApiError::new(code, "x").into_response();
        assert_eq!(response.status(), expected, "code {code}");
    }
}

#[test]
fn provider_no_path_maps_to_bad_request() {
    let err = map_graphhopper_error(&GraphHopperError::NoPath);
    assert_eq!(err.code, "no_route");
    assert_eq!(err.message, NO_ROUTE_MESSAGE);
}

#[tokio::test]
async fn health_reports_database_ok() {
    let server = MockServer::start().await;
    let app = test_app(&server.uri(), 5).await;

    let (status, json) = send(app, get("/api/v1/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "ok");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let server = MockServer::start().await;
    let app = test_app(&server.uri(), 5).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-42")
    );
}

#[tokio::test]
async fn get_route_manila_to_tagaytay() {
    let server = MockServer::start().await;
    mount_hit(&server, "Manila", 14.5995, 120.9842).await;
    mount_hit(&server, "Tagaytay", 14.1153, 120.9600).await;
    Mock::given(method("GET"))
        .and(path("/route"))
        .and(query_param("profile", "car"))
        .respond_with(ResponseTemplate::new(200).set_body_json(manila_tagaytay_path()))
        .expect(1)
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), 5).await;
    let (status, json) = send(
        app.clone(),
        post_json(
            "/get_route",
            &serde_json::json!({"from": "Manila", "to": "Tagaytay", "vehicle": "car", "unit": "km"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "body: {json}");
    assert_eq!(json["distance"], "55.20 km");
    assert_eq!(json["time"], "1h 23m 45s");
    assert_eq!(json["vehicle"], "Car");
    assert_eq!(json["unit"], "km");
    assert_eq!(json["from"], "Manila");
    assert_eq!(json["to"], "Tagaytay");
    assert_eq!(json["instructions"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["instructions"][0]["distance"], "1.20 km");
    assert_eq!(json["instructions"][2]["interval"], serde_json::json!([2, 2]));
    assert_eq!(json["points"]["coordinates"].as_array().map(Vec::len), Some(3));

    let (_, analytics) = send(app, get("/analytics_data")).await;
    assert_eq!(analytics["top_routes"][0]["label"], "Manila \u{2192} Tagaytay");
    assert_eq!(analytics["top_routes"][0]["count"], 1);
    assert_eq!(analytics["vehicle_usage"]["car"], 1);
}

#[tokio::test]
async fn get_route_in_miles_formats_distances() {
    let server = MockServer::start().await;
    mount_hit(&server, "Manila", 14.5995, 120.9842).await;
    mount_hit(&server, "Tagaytay", 14.1153, 120.9600).await;
    Mock::given(method("GET"))
        .and(path("/route"))
        .respond_with(ResponseTemplate::new(200).set_body_json(manila_tagaytay_path()))
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), 5).await;
    let (status, json) = send(
        app,
        post_json(
            "/get_route",
            &serde_json::json!({"from": "Manila", "to": "Tagaytay", "vehicle": "car", "unit": "mi"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["distance"], "34.30 mi");
    assert_eq!(json["unit"], "mi");
}

#[tokio::test]
async fn get_route_without_paths_is_bad_request() {
    let server = MockServer::start().await;
    mount_hit(&server, "Manila", 14.5995, 120.9842).await;
    mount_hit(&server, "Tagaytay", 14.1153, 120.9600).await;
    Mock::given(method("GET"))
        .and(path("/route"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"paths": []})))
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), 5).await;
    let (status, json) = send(
        app.clone(),
        post_json(
            "/get_route",
            &serde_json::json!({"from": "Manila", "to": "Tagaytay", "vehicle": "foot"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No route found between these points.");

    let (_, analytics) = send(app, get("/analytics")).await;
    assert!(analytics["top_routes"].as_array().is_some_and(Vec::is_empty));
}

#[tokio::test]
async fn get_route_missing_fields_is_bad_request() {
    let server = MockServer::start().await;
    let app = test_app(&server.uri(), 5).await;

    let (status, json) = send(
        app,
        post_json(
            "/get_route",
            &serde_json::json!({"to": "Batangas City", "vehicle": "car", "unit": "km"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Missing required fields: from.");
    assert_eq!(server.received_requests().await.map(|r| r.len()), Some(0));
}

#[tokio::test]
async fn get_route_falls_back_to_demo_coordinates() {
    let server = MockServer::start().await;
    mount_no_hits(&server).await;
    Mock::given(method("GET"))
        .and(path("/route"))
        .and(query_param("point", "14.5995,120.9842"))
        .respond_with(ResponseTemplate::new(200).set_body_json(manila_tagaytay_path()))
        .expect(1)
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), 5).await;
    let (status, json) = send(
        app,
        post_json(
            "/get_route",
            &serde_json::json!({"from": "manila", "to": "Batangas City", "vehicle": "car"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "body: {json}");
    assert_eq!(json["from"], "manila");
}

#[tokio::test]
async fn get_route_unknown_place_without_fallback_is_bad_request() {
    let server = MockServer::start().await;
    mount_no_hits(&server).await;

    let app = test_app(&server.uri(), 5).await;
    let (status, json) = send(
        app,
        post_json(
            "/get_route",
            &serde_json::json!({"from": "Atlantis", "to": "Manila", "vehicle": "car"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "Could not find location (and no fallback): Atlantis"
    );
    assert_eq!(json["code"], "place_not_found");
    assert_eq!(json["place"], "Atlantis");
}

#[tokio::test]
async fn get_route_geocoder_outage_without_fallback_is_geocode_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geocode"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), 5).await;
    let (status, json) = send(
        app,
        post_json(
            "/get_route",
            &serde_json::json!({"from": "Atlantis", "to": "Manila", "vehicle": "car"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "geocode_failed");
    assert!(json.get("place").is_none());
}

#[tokio::test]
async fn get_route_rejects_far_apart_points() {
    let server = MockServer::start().await;
    mount_hit(&server, "Manila", 14.5995, 120.9842).await;
    mount_hit(&server, "Tokyo", 35.6762, 139.6503).await;

    let app = test_app(&server.uri(), 5).await;
    let (status, json) = send(
        app,
        post_json(
            "/get_route",
            &serde_json::json!({"from": "Manila", "to": "Tokyo", "vehicle": "car"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "Detected locations too far apart. Please specify more clearly."
    );
}

#[tokio::test]
async fn get_route_upstream_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    mount_hit(&server, "Manila", 14.5995, 120.9842).await;
    mount_hit(&server, "Tagaytay", 14.1153, 120.9600).await;
    Mock::given(method("GET"))
        .and(path("/route"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), 5).await;
    let (status, json) = send(
        app,
        post_json(
            "/get_route",
            &serde_json::json!({"from": "Manila", "to": "Tagaytay", "vehicle": "car"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "upstream_error");
}

#[tokio::test]
async fn get_route_upstream_timeout_is_gateway_timeout() {
    let server = MockServer::start().await;
    mount_hit(&server, "Manila", 14.5995, 120.9842).await;
    mount_hit(&server, "Tagaytay", 14.1153, 120.9600).await;
    Mock::given(method("GET"))
        .and(path("/route"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(manila_tagaytay_path())
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), 1).await;
    let (status, json) = send(
        app,
        post_json(
            "/get_route",
            &serde_json::json!({"from": "Manila", "to": "Tagaytay", "vehicle": "car"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(
        json["error"],
        "The routing service took too long to respond. Please try again."
    );
}

#[tokio::test]
async fn geocode_passthrough_returns_provider_shape() {
    let server = MockServer::start().await;
    mount_hit(&server, "Manila", 14.5995, 120.9842).await;

    let app = test_app(&server.uri(), 5).await;
    let (status, json) = send(app, get("/api/geocode?q=Manila")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"][0]["point"]["lat"], 14.5995);
    assert_eq!(json["hits"][0]["name"], "Manila");
}

#[tokio::test]
async fn route_passthrough_validates_points() {
    let server = MockServer::start().await;
    let app = test_app(&server.uri(), 5).await;

    let (status, json) = send(app, get("/api/route?orig=14.5,121&dest=oops")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().is_some_and(|e| e.contains("dest")));
}

#[tokio::test]
async fn route_passthrough_forwards_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/route"))
        .and(query_param("profile", "bike"))
        .respond_with(ResponseTemplate::new(200).set_body_json(manila_tagaytay_path()))
        .expect(1)
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), 5).await;
    let (status, json) = send(
        app,
        get("/api/route?orig=14.5995,120.9842&dest=14.1153,120.96&vehicle=bike"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["paths"][0]["time"], 5_025_000);
}

#[tokio::test]
async fn autocomplete_is_empty_for_blank_query_and_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geocode"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = test_app(&server.uri(), 5).await;
    let (status, json) = send(app.clone(), get("/autocomplete?q=")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));

    let (status, json) = send(app, get("/autocomplete?q=Man")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn favorites_workflow() {
    let server = MockServer::start().await;
    let app = test_app(&server.uri(), 5).await;

    let (status, json) = send(
        app.clone(),
        post_json("/favorites", &serde_json::json!({"name": "Incomplete", "from": "A"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Missing required fields to save favorite route.");

    let (status, json) = send(
        app.clone(),
        post_json(
            "/favorites",
            &serde_json::json!({
                "name": "Test Route",
                "from": "A",
                "to": "B",
                "unit": "km",
                "distance": "10 km",
                "time": "15m 0s"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "Favorite route saved successfully.");
    let id = json["id"].as_i64().expect("numeric id");

    let (status, json) = send(app.clone(), get("/favorites")).await;
    assert_eq!(status, StatusCode::OK);
    let list = json.as_array().expect("array");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], id);
    assert_eq!(list[0]["origin"], "A");
    assert_eq!(list[0]["destination"], "B");
    assert_eq!(list[0]["vehicle"], "car");
    assert_eq!(list[0]["distance"], "10 km");

    let (status, json) = send(app.clone(), delete_req(&format!("/favorites/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Favorite route deleted.");

    let (status, json) = send(app, delete_req(&format!("/favorites/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Favorite not found.");
}

#[tokio::test]
async fn analytics_on_empty_history_is_empty() {
    let server = MockServer::start().await;
    let app = test_app(&server.uri(), 5).await;

    let (status, json) = send(app, get("/analytics")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!({"top_routes": [], "vehicle_usage": {}})
    );
}
