// Configuration module entry point
// Layered configuration (defaults, config file, environment) and runtime state

mod state;
mod types;
pub mod upstream;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, ProxyConfig, ServerConfig, StaticConfig};
pub use upstream::{UpstreamTable, UpstreamTarget};

/// Browser identity sent upstream so the price APIs don't block us
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const BROWSER_ACCEPT: &str = "application/json, text/plain, */*";

impl Config {
    /// Load configuration from specified file path (extension optional)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("GOLD")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("static.root", ".")?
            .set_default("static.index_files", vec!["index.html", "index.htm"])?
            .set_default("static.directory_listing", true)?
            .set_default("http.server_name", concat!("gold-proxy/", env!("CARGO_PKG_VERSION")))?
            .set_default("http.enable_cors", true)?
            .set_default("proxy.timeout_secs", 10)?
            .set_default("proxy.insecure_skip_verify", true)?
            .set_default("proxy.use_env_proxy", true)?
            .set_default("proxy.user_agent", BROWSER_USER_AGENT)?
            .set_default("proxy.accept", BROWSER_ACCEPT)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
