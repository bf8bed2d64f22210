use serde::{Serialize, Serializer};

/// One slot of the paging control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Page(u32),
    Ellipsis,
}

// Rendered as the page number or the literal "...".
impl Serialize for PageToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageToken::Page(n) => serializer.serialize_u32(*n),
            PageToken::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub pages: Vec<PageToken>,
    pub current_page: u32,
    pub total_pages: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Previous,
    Next,
}

impl std::str::FromStr for PageDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "previous" | "prev" => Ok(PageDirection::Previous),
            "next" => Ok(PageDirection::Next),
            other => Err(format!("unknown page direction '{}'", other)),
        }
    }
}

/// `ceil(item_count / page_size)`, never below one page.
pub fn total_pages(item_count: usize, page_size: u32) -> u32 {
    let page_size = page_size.max(1) as usize;
    let pages = item_count.div_ceil(page_size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// Page tokens for a list of `item_count` records.
pub fn compute_page_window(
    item_count: usize,
    current_page: u32,
    page_size: u32,
    max_visible_pages: u32,
) -> PageWindow {
    page_window(total_pages(item_count, page_size), current_page, max_visible_pages)
}

/// Page tokens with ellipsis collapsing.
///
/// Near the start the first `max - 1` pages are shown, near the end the
/// last `max - 1`, otherwise a window centred on the current page between
/// two ellipses. A single page renders no control at all.
pub fn page_window(total_pages: u32, current_page: u32, max_visible_pages: u32) -> PageWindow {
    let total = total_pages.max(1);
    let current = clamp_page(current_page, total);
    let max_visible = max_visible_pages.max(1);
    let half = max_visible / 2;

    let pages = if total <= 1 {
        Vec::new()
    } else if total <= max_visible {
        (1..=total).map(PageToken::Page).collect()
    } else if current <= half + 1 {
        let mut pages: Vec<PageToken> = (1..max_visible).map(PageToken::Page).collect();
        pages.push(PageToken::Ellipsis);
        pages.push(PageToken::Page(total));
        pages
    } else if current >= total - half {
        // last `max - 1` pages, counted back from `total` to stay in range
        let mut pages = vec![PageToken::Page(1), PageToken::Ellipsis];
        pages.extend((0..max_visible - 1).rev().map(|back| PageToken::Page(total - back)));
        pages
    } else {
        let mut pages = vec![PageToken::Page(1), PageToken::Ellipsis];
        pages.extend((current - half + 1..=current + half - 1).map(PageToken::Page));
        pages.push(PageToken::Ellipsis);
        pages.push(PageToken::Page(total));
        pages
    };

    PageWindow {
        pages,
        current_page: current,
        total_pages: total,
    }
}

/// Previous/next buttons; both stop at the boundary.
pub fn advance_page(direction: PageDirection, current_page: u32, total_pages: u32) -> u32 {
    let total = total_pages.max(1);
    let current = clamp_page(current_page, total);
    match direction {
        PageDirection::Previous if current > 1 => current - 1,
        PageDirection::Next if current < total => current + 1,
        _ => current,
    }
}

/// Rows of page `page` (1-based, already clamped).
pub fn page_slice<T: Clone>(items: &[T], page: u32, page_size: u32) -> Vec<T> {
    let page_size = page_size.max(1) as usize;
    let start = (page.max(1) as usize - 1).saturating_mul(page_size);
    items.iter().skip(start).take(page_size).cloned().collect()
}
