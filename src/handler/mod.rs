//! Request handler module
//!
//! The router picks one of two strategies per request: relay a fixed
//! upstream (`proxy`) or serve from the document root (`static_files`).

pub mod proxy;
pub mod router;
pub mod static_files;

pub use router::handle_request;
