/// Server configuration, read from the environment. The desktop shell sets
/// these before spawning the backend process; defaults suit local use.
pub struct Config {
    pub listen_addr: String,
    /// Directory holding the SQLite database (not the file itself)
    pub data_dir: String,
    /// Comma-separated list of allowed CORS origins
    pub cors_origins: String,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            listen_addr: std::env::var("CONTAS_LISTEN_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:8000".to_string()),
            data_dir: std::env::var("CONTAS_DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
            cors_origins: std::env::var("CONTAS_CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173,http://localhost".to_string()),
        }
    }
}
