use serde::{Deserialize, Serialize};

/// Paginated envelope returned by the `page`/`size` endpoint variants.
///
/// `page` is 0-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub page: u32,
    pub size: u32,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Page<T> {
    /// Empty envelope used when a paged request fails.
    #[must_use]
    pub fn empty(page: u32, size: u32) -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            page,
            size,
            has_previous: page > 0,
            has_next: false,
        }
    }

    /// Transforms every item while keeping the pagination metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            page: self.page,
            size: self.size,
            has_previous: self.has_previous,
            has_next: self.has_next,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
