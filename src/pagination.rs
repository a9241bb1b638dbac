use serde::Serialize;

use crate::error::AppError;

/// Default number of search results shown per page
pub const RESULTS_PER_PAGE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageDirection {
    Prev,
    Next,
}

/// A navigation button: which way it points and the page it goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageAction {
    pub direction: PageDirection,
    pub target: u32,
}

/// Which slice of the results belongs on a page, and how to leave it.
///
/// `end` is exclusive and may run past the result count; callers clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSelection {
    pub page: u32,
    pub num_pages: u32,
    pub start: usize,
    pub end: usize,
    pub actions: Vec<PageAction>,
}

impl PageSelection {
    pub fn prev(&self) -> Option<u32> {
        self.target(PageDirection::Prev)
    }

    pub fn next(&self) -> Option<u32> {
        self.target(PageDirection::Next)
    }

    fn target(&self, direction: PageDirection) -> Option<u32> {
        self.actions
            .iter()
            .find(|a| a.direction == direction)
            .map(|a| a.target)
    }
}

/// Select the slice and navigation buttons for `page`.
///
/// Button rules:
/// - one page or less: no buttons
/// - first page: "next" only
/// - inner page: "prev" and "next"
/// - last page: "prev" only
///
/// A page past the last one gets no buttons.
pub fn select_page(
    total_count: usize,
    page: u32,
    page_size: u32,
) -> Result<PageSelection, AppError> {
    if page == 0 || page_size == 0 {
        return Err(AppError::InvalidPage { page, page_size });
    }

    let num_pages = total_count.div_ceil(page_size as usize) as u32;
    let start = (page as usize - 1).saturating_mul(page_size as usize);
    let end = (page as usize).saturating_mul(page_size as usize);

    // Targets are only built where they fall inside 1..=num_pages
    let prev = || PageAction {
        direction: PageDirection::Prev,
        target: page - 1,
    };
    let next = || PageAction {
        direction: PageDirection::Next,
        target: page + 1,
    };

    let actions = if num_pages <= 1 {
        Vec::new()
    } else if page == 1 {
        vec![next()]
    } else if page < num_pages {
        vec![prev(), next()]
    } else if page == num_pages {
        vec![prev()]
    } else {
        Vec::new()
    };

    Ok(PageSelection {
        page,
        num_pages,
        start,
        end,
        actions,
    })
}
