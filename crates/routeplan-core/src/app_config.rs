use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub graphhopper_api_key: Option<String>,
    pub graphhopper_base_url: String,
    /// Country filter for geocoding; `None` searches worldwide.
    pub geocode_country: Option<String>,
    pub upstream_timeout_secs: u64,
    /// Bounded wait for one orchestrator chain (resolve + route).
    pub request_timeout_secs: u64,
    pub max_point_spread_deg: f64,
    pub backend_url: String,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &self.database_url)
            .field("db_max_connections", &self.db_max_connections)
            .field(
                "graphhopper_api_key",
                &self.graphhopper_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("graphhopper_base_url", &self.graphhopper_base_url)
            .field("geocode_country", &self.geocode_country)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_point_spread_deg", &self.max_point_spread_deg)
            .field("backend_url", &self.backend_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
