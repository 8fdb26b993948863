//! Logger module
//!
//! Startup banner, per-request access lines, and error/warning lines.
//! Output goes through the global writer once `init` has run and straight
//! to stdout/stderr before that.

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::{Config, UpstreamTable};
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, upstreams: &UpstreamTable) {
    let display_host = if addr.ip().is_unspecified() {
        "localhost".to_string()
    } else {
        addr.ip().to_string()
    };

    write_info("======================================");
    write_info(&format!(
        "Gold price server running at: http://{display_host}:{}",
        addr.port()
    ));
    write_info(&format!("Bound to: {addr}"));
    write_info(&format!("Document root: {}", config.static_files.root));
    for target in upstreams.iter() {
        write_info(&format!("Proxy: {}* -> {}", target.prefix, target.url));
    }
    write_info(&format!(
        "Upstream timeout: {}s",
        config.proxy.timeout_secs
    ));
    if config.proxy.insecure_skip_verify {
        write_info("Upstream TLS verification: DISABLED (insecure_skip_verify)");
    } else {
        write_info("Upstream TLS verification: enabled");
    }
    if !config.proxy.use_env_proxy {
        write_info("Upstream proxy from environment: ignored");
    }
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("Press Ctrl+C to stop the server");
    write_info("======================================\n");
}

pub fn log_shutdown(reason: &str) {
    write_info(&format!("\n[Shutdown] {reason} received, stopping server"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}
