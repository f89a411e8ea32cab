//! Page arithmetic shared by the article service and the posts store.

/// Number of items to skip for a 1-based `page`.
pub fn offset_for(page: u32, page_size: u32) -> u64 {
    u64::from(page.max(1) - 1) * u64::from(page_size)
}

/// Last reachable page for `total` items; never less than 1.
pub fn max_page(total: u64, page_size: u32) -> u32 {
    let per_page = u64::from(page_size.max(1));
    let pages = total.div_ceil(per_page).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

pub fn clamp_page(page: u32, max_page: u32) -> u32 {
    page.max(1).min(max_page.max(1))
}
