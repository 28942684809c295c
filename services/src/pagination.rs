use serde::Serialize;

/// Page metadata returned alongside a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub limit: u64,
    pub total_count: u64,
    pub total_pages: u64,
    pub has_more: bool,
}

impl Pagination {
    /// Builds page metadata. `page` and `limit` are clamped to at least 1.
    pub fn new(page: u64, limit: u64, total_count: u64) -> Self {
        let current_page = page.max(1);
        let limit = limit.max(1);
        let total_pages = total_count.div_ceil(limit);

        Self {
            current_page,
            limit,
            total_count,
            total_pages,
            has_more: current_page < total_pages,
        }
    }

    /// Index of the first item on the current page.
    pub fn offset(&self) -> u64 {
        (self.current_page - 1).saturating_mul(self.limit)
    }

    /// Cuts the current page out of an already sorted, complete list.
    ///
    /// Returns an empty vector once the offset runs past the end.
    pub fn page_slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.into_iter().skip(offset).take(limit).collect()
    }
}
