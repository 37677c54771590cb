//! Search filter and page slicing for the file list.
//!
//! Pure functions over the cached list plus a small [`Pager`] that keeps the current
//! page index valid. Pages are 1-based.

use crate::types::FileRecord;

/// Rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Records whose name contains `query`, ignoring case. An empty query keeps everything.
pub fn filtered<'a>(files: &'a [FileRecord], query: &str) -> Vec<&'a FileRecord> {
    if query.is_empty() {
        return files.iter().collect();
    }
    let needle = query.to_lowercase();
    files.iter().filter(|f| f.file_name.to_lowercase().contains(&needle)).collect()
}

/// Elements `[(page-1)*size, page*size)` of `items`, clamped to what exists.
pub fn page<T>(items: &[T], page: usize, size: usize) -> &[T] {
    if size == 0 || page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(size).min(items.len());
    let end = page.saturating_mul(size).min(items.len());
    &items[start..end]
}

/// Number of pages for `len` items. Never less than one, so page 1 always exists.
pub fn total_pages(len: usize, size: usize) -> usize {
    if size == 0 {
        return 1;
    }
    len.div_ceil(size).max(1)
}

/// Current page of a list whose length changes under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    size: usize,
}

impl Pager {
    pub fn new(size: usize) -> Self {
        Self { page: 1, size: size.max(1) }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Advances one page if another page exists. Returns whether it moved.
    pub fn next(&mut self, len: usize) -> bool {
        if self.page * self.size < len {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Goes back one page unless already on the first. Returns whether it moved.
    pub fn previous(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// New page size. The page number is kept; callers clamp afterwards.
    pub fn resize(&mut self, size: usize) {
        self.size = size.max(1);
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Pulls the page back into `[1, total_pages(len)]`.
    pub fn clamp(&mut self, len: usize) {
        self.page = self.page.clamp(1, total_pages(len, self.size));
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.page * self.size < len
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
