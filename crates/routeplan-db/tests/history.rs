//! Route history aggregates against a private in-memory SQLite database.

use routeplan_db::{connect_in_memory, load_analytics, record_route, top_routes, vehicle_usage};

#[tokio::test]
async fn empty_history_yields_empty_series() {
    let pool = connect_in_memory().await.expect("in-memory pool");

    let series = load_analytics(&pool, 5).await.expect("analytics");
    assert!(series.is_empty());
}

#[tokio::test]
async fn top_routes_are_ranked_by_count_and_limited() {
    let pool = connect_in_memory().await.expect("in-memory pool");

    for _ in 0..3 {
        record_route(&pool, "Manila", "Tagaytay", "car").await.expect("record");
    }
    record_route(&pool, "Cebu", "Lapu-Lapu", "bike").await.expect("record");
    record_route(&pool, "Cebu", "Lapu-Lapu", "foot").await.expect("record");
    record_route(&pool, "Davao", "Samal", "car").await.expect("record");

    let rows = top_routes(&pool, 2).await.expect("top routes");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].origin, "Manila");
    assert_eq!(rows[0].count, 3);
    assert_eq!(rows[1].origin, "Cebu");
    assert_eq!(rows[1].count, 2);
}

#[tokio::test]
async fn analytics_series_combines_both_aggregates() {
    let pool = connect_in_memory().await.expect("in-memory pool");

    record_route(&pool, "Manila", "Tagaytay", "car").await.expect("record");
    record_route(&pool, "Manila", "Tagaytay", "car").await.expect("record");
    record_route(&pool, "Manila", "Quezon City", "bike").await.expect("record");

    let usage = vehicle_usage(&pool).await.expect("usage");
    assert_eq!(usage[0].vehicle, "car");
    assert_eq!(usage[0].count, 2);

    let series = load_analytics(&pool, 5).await.expect("analytics");
    assert_eq!(series.top_routes.len(), 2);
    assert_eq!(series.top_routes[0].label, "Manila \u{2192} Tagaytay");
    assert_eq!(series.top_routes[0].count, 2);
    assert_eq!(series.vehicle_usage.get("car"), Some(&2));
    assert_eq!(series.vehicle_usage.get("bike"), Some(&1));
}
