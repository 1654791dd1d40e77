//! Physical index naming.
//!
//! Each rebuild run writes into a fresh physical index named
//! `{alias}-{token}`, where the token is a URL-safe rendering of the run
//! start time. Tokens are strictly monotonic process-wide, so two runs of
//! the same alias can never collide even when started within the same
//! millisecond.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Millisecond value handed out by the previous [`physical_index_name`] call.
static LAST_TOKEN_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Derive the physical index name for a rebuild run starting now.
///
/// The token is formatted as `YYYYMMDD-HHMMSS-mmm` from a logical
/// millisecond clock: each call takes `max(now, last + 1)`, so consecutive
/// names for the same alias always differ and sort in creation order.
///
/// # Example
///
/// ```
/// use index_rebuilder_repository::physical_index_name;
///
/// let first = physical_index_name("products");
/// let second = physical_index_name("products");
/// assert!(first.starts_with("products-"));
/// assert_ne!(first, second);
/// ```
pub fn physical_index_name(alias: &str) -> String {
    format!("{}-{}", alias, timestamp_token(next_token_millis()))
}

/// Advance the logical millisecond clock and return its new value.
fn next_token_millis() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_TOKEN_MILLIS.load(Ordering::SeqCst);
    loop {
        let next = now.max(last + 1);
        match LAST_TOKEN_MILLIS.compare_exchange_weak(last, next, Ordering::SeqCst, Ordering::SeqCst)
        {
            Ok(_) => return next,
            Err(observed) => last = observed,
        }
    }
}

/// Render logical milliseconds as a fixed-width, URL-safe token.
fn timestamp_token(millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(ts) => ts.format("%Y%m%d-%H%M%S-%3f").to_string(),
        // Out-of-range clock value; the raw millis are still unique.
        None => millis.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_prefixed_with_alias() {
        let name = physical_index_name("products");
        assert!(name.starts_with("products-"));
    }

    #[test]
    fn test_token_is_url_safe() {
        let name = physical_index_name("products");
        let token = name.strip_prefix("products-").unwrap();
        assert!(token.chars().all(|c| c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn test_rapid_successive_names_never_collide() {
        let names: Vec<String> = (0..100).map(|_| physical_index_name("products")).collect();

        for pair in names.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_tokens_sort_in_creation_order() {
        let first = physical_index_name("products");
        let second = physical_index_name("products");

        // Fixed-width formatting makes lexicographic order match creation order.
        assert!(second > first);
    }

    #[test]
    fn test_token_format() {
        // 2024-05-01T12:30:45.123Z
        let token = timestamp_token(1_714_566_645_123);
        assert_eq!(token, "20240501-123045-123");
    }
}
