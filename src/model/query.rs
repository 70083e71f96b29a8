//! Catalog query and pagination state

use serde::{Deserialize, Serialize};

/// Number of dogs requested per page. Fixed by the search contract.
pub const PAGE_SIZE: usize = 25;

/// Maximum number of page links shown in the pagination bar
pub const PAGE_WINDOW: usize = 5;

/// Breed sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Label shown in the sort selector
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Asc => "A to Z",
            SortOrder::Desc => "Z to A",
        }
    }

    /// Value of the `sort` query parameter
    pub fn sort_param(&self) -> String {
        format!("breed:{}", self.as_str())
    }

    pub fn toggled(&self) -> SortOrder {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Filter, sort and page selection driving the catalog fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Selected breeds in the order they were picked. No duplicates.
    pub selected_breeds: Vec<String>,
    pub sort_order: SortOrder,
    /// 1-based
    pub current_page: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self::new(SortOrder::default())
    }
}

impl CatalogQuery {
    pub fn new(sort_order: SortOrder) -> Self {
        Self {
            selected_breeds: Vec::new(),
            sort_order,
            current_page: 1,
        }
    }

    /// Offset of the first result on the current page
    pub fn from_offset(&self) -> usize {
        self.current_page.saturating_sub(1) * PAGE_SIZE
    }

    pub fn is_breed_selected(&self, breed: &str) -> bool {
        self.selected_breeds.iter().any(|b| b == breed)
    }

    /// Add the breed if absent, remove it otherwise
    pub fn toggle_breed(&mut self, breed: &str) {
        if let Some(pos) = self.selected_breeds.iter().position(|b| b == breed) {
            self.selected_breeds.remove(pos);
        } else {
            self.selected_breeds.push(breed.to_string());
        }
    }
}

/// Pagination derived from the last successful search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_results: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
            total_results: 0,
        }
    }
}

impl PageState {
    pub fn new(current_page: usize, total_results: usize) -> Self {
        Self {
            current_page,
            total_pages: total_pages(total_results),
            total_results,
        }
    }

    /// Highest page a query may request; at least 1 even for empty results
    pub fn last_page(&self) -> usize {
        self.total_pages.max(1)
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}

/// `ceil(total_results / PAGE_SIZE)`
pub fn total_pages(total_results: usize) -> usize {
    total_results.div_ceil(PAGE_SIZE)
}

/// Page numbers to show as links, at most `width` of them, centred on `current`
pub fn page_window(current: usize, total_pages: usize, width: usize) -> Vec<usize> {
    if total_pages == 0 || width == 0 {
        return Vec::new();
    }

    let current = current.clamp(1, total_pages);
    let half = width / 2;
    let mut start = current.saturating_sub(half).max(1);
    let end = (start + width - 1).min(total_pages);
    // Shift left when the window hits the last page
    start = end.saturating_sub(width - 1).max(1);

    (start..=end).collect()
}
