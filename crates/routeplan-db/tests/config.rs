//! Offline tests for pool configuration. No database required.

use routeplan_core::{AppConfig, Environment};
use routeplan_db::PoolConfig;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 5000),
        log_level: "info".to_string(),
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 12,
        graphhopper_api_key: None,
        graphhopper_base_url: "https://graphhopper.com/api/1/".to_string(),
        geocode_country: Some("PH".to_string()),
        upstream_timeout_secs: 40,
        request_timeout_secs: 15,
        max_point_spread_deg: 10.0,
        backend_url: "http://127.0.0.1:5000".to_string(),
        user_agent: "ua".to_string(),
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 12);
    assert_eq!(
        pool_config.acquire_timeout_secs,
        PoolConfig::default().acquire_timeout_secs
    );
}
