//! Offset/limit pagination.

/// Items per page when the client does not ask for a size.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Largest skip or limit a store accepts; both travel as signed 64-bit
/// integers on the wire.
pub const MAX_WINDOW: u64 = i64::MAX.unsigned_abs();

/// Parsed pagination parameters.
///
/// `page` is 1-indexed. Values that are not positive integers are dropped
/// at parse time, so `page` falls back to "no skip" and `size` to
/// [`DEFAULT_PAGE_SIZE`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<u64>,
    pub size: Option<u64>,
}

/// Resolved skip/limit pair handed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Parse raw query string values.
    #[must_use]
    pub fn parse(page: Option<&str>, size: Option<&str>) -> Self {
        Self {
            page: page.and_then(positive),
            size: size.and_then(positive),
        }
    }

    /// Compute skip and limit.
    ///
    /// `limit` is `size` or the default; `skip` is `(page - 1) * limit`
    /// when a page was given and zero otherwise. Both are capped at
    /// [`MAX_WINDOW`], so an out-of-range page yields an empty result.
    #[must_use]
    pub fn resolve(&self) -> Pagination {
        let limit = self.size.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_WINDOW);
        let skip = self
            .page
            .map_or(0, |page| page.saturating_sub(1).saturating_mul(limit))
            .min(MAX_WINDOW);

        Pagination { skip, limit }
    }
}

fn positive(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|n| *n > 0)
}
