//! View pipeline: filter, sort and paginate the fetched product list.

use std::cmp::Ordering;

use shared::domain::{Product, SortDirection, SortField, SortSpec};

pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Page-number buttons shown on each side of the current page.
const PAGE_WINDOW_RADIUS: usize = 2;

/// User-controlled knobs that determine what is currently visible.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewParameters {
    pub search: String,
    pub sort: Option<SortSpec>,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ViewParameters {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    /// A different field sorts ascending; the active field flips direction.
    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort = Some(match self.sort {
            Some(spec) if spec.field == field => SortSpec {
                field,
                direction: spec.direction.flipped(),
            },
            _ => SortSpec {
                field,
                direction: SortDirection::Ascending,
            },
        });
    }
}

/// Derived projection of the product list under a set of [`ViewParameters`].
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub items: Vec<Product>,
    pub total_pages: usize,
    pub current_page: usize,
}

impl ViewState {
    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn page_slice(&self, page_size: usize) -> &[Product] {
        let page_size = page_size.max(1);
        let start = (self.current_page.saturating_sub(1) * page_size).min(self.items.len());
        let end = (start + page_size).min(self.items.len());
        &self.items[start..end]
    }
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Pure: reads `params.page` and returns it clamped into `[1, total_pages]`.
pub fn compute_view(products: &[Product], params: &ViewParameters) -> ViewState {
    let keyword = params.search.trim().to_lowercase();
    let mut items: Vec<Product> = if keyword.is_empty() {
        products.to_vec()
    } else {
        products
            .iter()
            .filter(|product| product.title.to_lowercase().contains(&keyword))
            .cloned()
            .collect()
    };

    if let Some(spec) = params.sort {
        // sort_by is stable, so equal keys keep their relative order in both directions.
        items.sort_by(|a, b| {
            let ordering = compare_by(spec.field, a, b);
            match spec.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    let total_pages = total_pages(items.len(), params.page_size);
    let current_page = params.page.clamp(1, total_pages);

    ViewState {
        items,
        total_pages,
        current_page,
    }
}

fn compare_by(field: SortField, a: &Product, b: &Product) -> Ordering {
    match field {
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortField::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControlKind {
    First,
    Previous,
    Number(usize),
    Next,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControl {
    pub kind: PageControlKind,
    pub target: usize,
    pub disabled: bool,
    pub active: bool,
}

/// First/previous, up to five page numbers centered on `current_page`, then next/last.
pub fn pagination_controls(current_page: usize, total_pages: usize) -> Vec<PageControl> {
    let total_pages = total_pages.max(1);
    let current_page = current_page.clamp(1, total_pages);
    let at_start = current_page == 1;
    let at_end = current_page == total_pages;

    let mut controls = vec![
        PageControl {
            kind: PageControlKind::First,
            target: 1,
            disabled: at_start,
            active: false,
        },
        PageControl {
            kind: PageControlKind::Previous,
            target: current_page.saturating_sub(1).max(1),
            disabled: at_start,
            active: false,
        },
    ];

    let start = current_page.saturating_sub(PAGE_WINDOW_RADIUS).max(1);
    let end = (current_page + PAGE_WINDOW_RADIUS).min(total_pages);
    controls.extend((start..=end).map(|page| PageControl {
        kind: PageControlKind::Number(page),
        target: page,
        disabled: false,
        active: page == current_page,
    }));

    controls.push(PageControl {
        kind: PageControlKind::Next,
        target: (current_page + 1).min(total_pages),
        disabled: at_end,
        active: false,
    });
    controls.push(PageControl {
        kind: PageControlKind::Last,
        target: total_pages,
        disabled: at_end,
        active: false,
    });
    controls
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
