//! HTTP Range request parsing module
//!
//! Single `bytes=` ranges only (RFC 7233). Multi-range requests are answered
//! with the full body.

/// Inclusive byte span already clamped to the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteSpan {
    pub start: usize,
    pub end: usize,
}

impl ByteSpan {
    pub const fn len(self) -> usize {
        self.end - self.start + 1
    }
}

/// Range header parse result
#[derive(Debug, PartialEq, Eq)]
pub enum RangeOutcome {
    /// Serve this span with 206
    Partial(ByteSpan),
    /// Should return 416
    NotSatisfiable,
    /// No Range header, or one we ignore: serve everything
    Full,
}

/// Parse HTTP Range header against a body of `file_size` bytes
///
/// - `bytes=start-end`
/// - `bytes=start-`
/// - `bytes=-suffix`
pub fn parse_range_header(range_header: Option<&str>, file_size: usize) -> RangeOutcome {
    let Some(ranges) = range_header.and_then(|h| h.trim().strip_prefix("bytes=")) else {
        return RangeOutcome::Full;
    };
    if ranges.contains(',') {
        return RangeOutcome::Full;
    }
    let Some((first, last)) = ranges.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (first, last) = (first.trim(), last.trim());

    if file_size == 0 {
        return RangeOutcome::NotSatisfiable;
    }
    let last_byte = file_size - 1;

    if first.is_empty() {
        // "-500" means the final 500 bytes
        return match last.parse::<usize>() {
            Ok(0) => RangeOutcome::NotSatisfiable,
            Ok(n) => RangeOutcome::Partial(ByteSpan {
                start: file_size.saturating_sub(n),
                end: last_byte,
            }),
            Err(_) => RangeOutcome::Full,
        };
    }

    let Ok(start) = first.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if start > last_byte {
        return RangeOutcome::NotSatisfiable;
    }

    let end = if last.is_empty() {
        last_byte
    } else {
        match last.parse::<usize>() {
            Ok(e) if e < start => return RangeOutcome::NotSatisfiable,
            Ok(e) => e.min(last_byte),
            Err(_) => return RangeOutcome::Full,
        }
    };

    RangeOutcome::Partial(ByteSpan { start, end })
}
