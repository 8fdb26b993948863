// Application state module
// Immutable state built once at startup and shared by every connection

use super::types::Config;
use super::upstream::UpstreamTable;
use crate::handler::proxy::{FetchError, UpstreamClient};

/// Application state
pub struct AppState {
    pub config: Config,
    pub upstreams: UpstreamTable,
    pub client: UpstreamClient,
}

impl AppState {
    /// Build state with the compiled-in upstream table
    pub fn new(config: Config) -> Result<Self, FetchError> {
        Self::with_upstreams(config, UpstreamTable::fixed())
    }

    pub fn with_upstreams(config: Config, upstreams: UpstreamTable) -> Result<Self, FetchError> {
        let client = UpstreamClient::new(&config.proxy)?;
        Ok(Self {
            config,
            upstreams,
            client,
        })
    }
}
