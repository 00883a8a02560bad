use super::AccessionsPage;

/// Page cursor movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    First,
    Prev,
    Next,
    Last,
}

/// Parameters of a single accession list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub query: Option<String>,
    pub genre: Option<String>,
}

/// Pagination and filter state of the admin accession list.
/// 管理端列表的分页与过滤状态。
///
/// `page` is 1-based and kept within `[1, last_page()]` by every movement.
/// Changing either filter puts the cursor back on page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    page: u32,
    page_size: u32,
    total_count: u64,
    filtered_count: u64,
    query: String,
    genre: String,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 0,
            total_count: 0,
            filtered_count: 0,
            query: String::new(),
            genre: String::new(),
        }
    }
}

impl PageWindow {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn filtered_count(&self) -> u64 {
        self.filtered_count
    }

    pub fn query_str(&self) -> &str {
        &self.query
    }

    pub fn genre_filter(&self) -> &str {
        &self.genre
    }

    pub fn is_filtered(&self) -> bool {
        !self.query.is_empty() || !self.genre.is_empty()
    }

    /// `floor(total_count / page_size) + 1`, with or without filters. Before
    /// the first response (`page_size == 0`) there is exactly one page.
    pub fn last_page(&self) -> u32 {
        if self.page_size == 0 {
            return 1;
        }
        let pages = self.total_count / u64::from(self.page_size) + 1;
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn apply(&mut self, movement: PageMove) {
        let last = self.last_page();
        self.page = match movement {
            PageMove::First => 1,
            PageMove::Prev => self.page.saturating_sub(1).max(1),
            PageMove::Next => self.page.saturating_add(1).min(last),
            PageMove::Last => last,
        };
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into().trim().to_string();
        self.page = 1;
    }

    pub fn set_genre(&mut self, genre: impl Into<String>) {
        self.genre = genre.into().trim().to_string();
        self.page = 1;
    }

    pub fn reset_filters(&mut self) {
        self.query.clear();
        self.genre.clear();
        self.filtered_count = 0;
        self.page = 1;
    }

    pub fn to_query(&self) -> PageQuery {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        PageQuery {
            page: self.page,
            query: non_empty(&self.query),
            genre: non_empty(&self.genre),
        }
    }

    /// Take counts and the page echo from a server response.
    pub fn absorb(&mut self, response: &AccessionsPage) {
        self.total_count = response.total;
        self.filtered_count = response.filtered_total;
        self.page_size = response.page_size;
        self.page = response.page.max(1);
    }
}
