//! HTTP protocol layer module
//!
//! Protocol helpers shared by the proxy and static strategies, free of any
//! routing decisions.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

pub use range::{parse_range_header, RangeOutcome};
pub use response::{
    build_304_response, build_404_response, build_405_response, build_416_response,
    build_json_error_response, build_moved_permanently, build_options_response,
    build_proxied_response,
};
