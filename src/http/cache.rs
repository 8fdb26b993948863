//! Conditional request module
//!
//! `ETag` / `Last-Modified` validators for static files and the
//! `If-None-Match` / `If-Modified-Since` checks that turn a hit into a 304.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Cache validators for one file version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validators {
    pub etag: String,
    /// Modification time truncated to whole seconds
    pub modified: Option<DateTime<Utc>>,
}

impl Validators {
    /// Weak-ish validators from size and mtime; the file is never hashed.
    pub fn from_metadata(len: u64, modified: Option<SystemTime>) -> Self {
        let secs = modified
            .and_then(|m| m.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs());
        let etag = match secs {
            Some(s) => format!("\"{len:x}-{s:x}\""),
            None => format!("\"{len:x}\""),
        };
        let modified = secs
            .and_then(|s| i64::try_from(s).ok())
            .and_then(|s| DateTime::from_timestamp(s, 0));
        Self { etag, modified }
    }

    pub fn last_modified_header(&self) -> Option<String> {
        self.modified.map(|m| m.format(HTTP_DATE).to_string())
    }

    /// `If-None-Match` wins when present; `If-Modified-Since` is only
    /// consulted without it.
    pub fn is_fresh(&self, if_none_match: Option<&str>, if_modified_since: Option<&str>) -> bool {
        if let Some(client_etags) = if_none_match {
            return client_etags
                .split(',')
                .map(str::trim)
                .any(|e| e == "*" || e.trim_start_matches("W/") == self.etag);
        }

        match (self.modified, if_modified_since.and_then(parse_http_date)) {
            (Some(modified), Some(since)) => modified <= since,
            _ => false,
        }
    }
}

fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), HTTP_DATE)
        .ok()
        .map(|n| n.and_utc())
}
