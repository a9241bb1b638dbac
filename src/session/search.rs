use log::info;

use crate::error::AppError;
use crate::model::RecipeSummary;
use crate::pagination::{select_page, PageSelection};
use crate::providers::RecipeProvider;

/// Default width, in characters, used when shortening result titles
pub const TITLE_LIMIT: usize = 17;

/// One query and its results.
///
/// Results are replaced as a whole by a load and never edited otherwise.
#[derive(Debug, Clone)]
pub struct SearchSession {
    generation: u64,
    query: String,
    results: Vec<RecipeSummary>,
    loaded: bool,
    page: u32,
}

/// The results visible on one page together with its navigation
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsPage<'a> {
    pub results: &'a [RecipeSummary],
    pub selection: PageSelection,
}

impl SearchSession {
    pub fn new(generation: u64, query: impl Into<String>) -> Self {
        Self {
            generation,
            query: query.into(),
            results: Vec::new(),
            loaded: false,
            page: 1,
        }
    }

    /// Run the query against `provider` and keep its results in order
    pub async fn load(&mut self, provider: &dyn RecipeProvider) -> Result<(), AppError> {
        let results = provider.search(&self.query).await?;
        self.set_results(results);
        Ok(())
    }

    pub(crate) fn set_results(&mut self, results: Vec<RecipeSummary>) {
        info!("{} results for {:?}", results.len(), self.query);
        self.results = results;
        self.loaded = true;
        self.page = 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[RecipeSummary] {
        &self.results
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    /// Make `page` the current page. Pages outside `1..=num_pages` are
    /// rejected and leave the current page as it was; an empty result set
    /// only has page 1.
    pub fn go_to_page(&mut self, page: u32, per_page: u32) -> Result<(), AppError> {
        let selection = select_page(self.results.len(), page, per_page)?;
        let last = selection.num_pages.max(1);
        if page > last {
            return Err(AppError::PageOutOfRange {
                page,
                num_pages: selection.num_pages,
            });
        }
        self.page = page;
        Ok(())
    }

    /// Slice out `page`, clipped to the available results
    pub fn page(&self, page: u32, per_page: u32) -> Result<ResultsPage<'_>, AppError> {
        let selection = select_page(self.results.len(), page, per_page)?;
        let start = selection.start.min(self.results.len());
        let end = selection.end.min(self.results.len());
        Ok(ResultsPage {
            results: &self.results[start..end],
            selection,
        })
    }
}

/// Shorten `title` to whole words whose combined length fits in `limit`,
/// marking the cut with `...`. Titles within the limit are returned as is.
pub fn limit_title(title: &str, limit: usize) -> String {
    if title.chars().count() <= limit {
        return title.to_string();
    }

    let mut kept = Vec::new();
    let mut length = 0;
    for word in title.split(' ') {
        let word_len = word.chars().count();
        if length + word_len <= limit {
            kept.push(word);
        }
        length += word_len;
    }
    format!("{}...", kept.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries(n: usize) -> Vec<RecipeSummary> {
        (0..n)
            .map(|i| RecipeSummary {
                id: i.to_string(),
                title: format!("Recipe {}", i),
                publisher: "Pub".to_string(),
                image_url: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_page_is_clipped() {
        let mut session = SearchSession::new(1, "pizza");
        session.set_results(summaries(25));

        let first = session.page(1, 10).unwrap();
        assert_eq!(first.results.len(), 10);
        assert_eq!(first.results[0].id, "0");

        let last = session.page(3, 10).unwrap();
        assert_eq!(last.results.len(), 5);
        assert_eq!(last.results[0].id, "20");
        assert_eq!(last.selection.prev(), Some(2));
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let mut session = SearchSession::new(1, "pizza");
        session.set_results(summaries(3));
        let page = session.page(4, 10).unwrap();
        assert!(page.results.is_empty());
        assert!(page.selection.actions.is_empty());
    }

    #[test]
    fn test_new_results_reset_page() {
        let mut session = SearchSession::new(1, "pizza");
        session.set_results(summaries(30));
        session.go_to_page(3, 10).unwrap();
        session.set_results(summaries(5));
        assert_eq!(session.current_page(), 1);
        assert!(matches!(
            session.go_to_page(0, 10),
            Err(AppError::InvalidPage { page: 0, page_size: 10 })
        ));
    }

    #[test]
    fn test_go_to_page_past_end_is_rejected() {
        let mut session = SearchSession::new(1, "pizza");
        session.set_results(summaries(25));
        session.go_to_page(2, 10).unwrap();

        assert!(matches!(
            session.go_to_page(4, 10),
            Err(AppError::PageOutOfRange { page: 4, num_pages: 3 })
        ));
        assert!(matches!(
            session.go_to_page(u32::MAX, 10),
            Err(AppError::PageOutOfRange { num_pages: 3, .. })
        ));
        assert_eq!(session.current_page(), 2);
    }

    #[test]
    fn test_limit_title() {
        assert_eq!(limit_title("Pasta with tomato and spinach", 17), "Pasta with tomato...");
        assert_eq!(limit_title("Short title", 17), "Short title");
        assert_eq!(limit_title("Exactly seventeen", 17), "Exactly seventeen");
    }

    #[test]
    fn test_limit_title_long_first_word() {
        assert_eq!(limit_title("Supercalifragilistic pie", 17), "...");
    }
}
