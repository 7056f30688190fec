/// Number of symbol cards shown per page.
pub const PAGE_SIZE: usize = 4;

pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Items of the 1-based `page`; shorter on the last page, empty past the end.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }

    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Current page and search query of the symbol list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    page: usize,
    query: String,
    page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            query: String::new(),
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the search query; the page always goes back to 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    /// Change page size and pull the page back inside the new bounds.
    pub fn set_page_size(&mut self, page_size: usize, count: usize) {
        self.page_size = page_size.max(1);
        self.clamp(total_pages(count, self.page_size));
    }

    /// Jump to `page`; requests outside `[1, total]` are ignored.
    pub fn go_to(&mut self, page: usize, total: usize) -> bool {
        if page < 1 || page > total {
            return false;
        }
        self.page = page;
        true
    }

    pub fn next(&mut self, total: usize) -> bool {
        self.go_to(self.page + 1, total)
    }

    pub fn previous(&mut self, total: usize) -> bool {
        match self.page.checked_sub(1) {
            Some(page) => self.go_to(page, total),
            None => false,
        }
    }

    /// Restore `1 <= page <= total` after the underlying list changed.
    pub fn clamp(&mut self, total: usize) {
        self.page = self.page.clamp(1, total.max(1));
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        page_slice(items, self.page, self.page_size)
    }
}
