//! Server configuration, read from environment variables (a `.env` file is
//! loaded first by the binary).

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub port: u16,
    /// Upper bound of the PostgreSQL pool.
    pub max_connections: u32,
    /// Path of the endpoint catalog served at `GET /api`.
    pub endpoints_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/nc_news".into()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(9090),
            max_connections: std::env::var("MAX_CONNECTIONS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(5),
            endpoints_path: std::env::var("ENDPOINTS_PATH")
                .unwrap_or_else(|_| "endpoints.json".into()),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
