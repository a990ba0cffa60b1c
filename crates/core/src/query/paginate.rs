//! Page slicing and neighbour links.

use std::ops::Range;

use super::types::{PageLinks, QueryParams};

/// Number of the last non-empty page, 0 when there is nothing to page.
pub fn last_page(total: usize, size: u32) -> usize {
    total.div_ceil(size.max(1) as usize)
}

fn offset(page: u32, size: u32) -> usize {
    (page.max(1) as usize - 1).saturating_mul(size as usize)
}

/// The index range of `page` within `total` filtered records.
///
/// Pages past the end yield an empty range at `total`.
pub fn page_range(total: usize, page: u32, size: u32) -> Range<usize> {
    let start = offset(page, size).min(total);
    let end = start.saturating_add(size as usize).min(total);
    start..end
}

/// Build `next`/`previous` links for `params.page`.
///
/// Both echo `params` with only the page number changed. `previous` never
/// points past the last page, so overshooting the end links back to the
/// real last page.
pub fn paginate(total: usize, params: &QueryParams) -> PageLinks {
    let size = params.size.max(1);
    let page = params.page.max(1);
    let offset = offset(page, size);

    let next = (offset.saturating_add(size as usize) < total)
        .then(|| params.at_page(page.saturating_add(1)));

    let previous = (offset > 0).then(|| {
        let last = u32::try_from(last_page(total, size)).unwrap_or(u32::MAX);
        params.at_page((page - 1).min(last).max(1))
    });

    PageLinks { next, previous }
}
