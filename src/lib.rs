//! gold-proxy
//!
//! Local development server for the gold price board. Serves the front end
//! from a document root and relays two fixed price APIs (Phu Quy, BTMC) to
//! the browser with CORS headers attached.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

#[cfg(test)]
pub mod test_utils;
