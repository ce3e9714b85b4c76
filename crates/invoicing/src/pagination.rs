//! Fixed-size pagination over an already filtered, ordered result set.

use core::ops::Range;

/// Rows per page on the invoices table.
pub const PAGE_SIZE: usize = 6;

/// Index range of 1-based `page` within a result of length `len`.
///
/// `offset = (page - 1) * PAGE_SIZE`, clipped to `0..len`. Pages `<= 0` and
/// pages past the end produce an empty range.
pub fn page_bounds(page: i64, len: usize) -> Range<usize> {
    if page < 1 {
        return 0..0;
    }
    let offset = (page - 1).saturating_mul(PAGE_SIZE as i64);
    let start = usize::try_from(offset).unwrap_or(usize::MAX).min(len);
    let end = start.saturating_add(PAGE_SIZE).min(len);
    start..end
}

/// Take one page out of `rows`.
pub fn into_page<T>(rows: Vec<T>, page: i64) -> Vec<T> {
    let range = page_bounds(page, rows.len());
    rows.into_iter()
        .skip(range.start)
        .take(range.end - range.start)
        .collect()
}

/// Number of pages needed for `count` rows: `ceil(count / PAGE_SIZE)`.
pub fn total_pages(count: usize) -> u64 {
    count.div_ceil(PAGE_SIZE) as u64
}
