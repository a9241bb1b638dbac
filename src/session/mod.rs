mod recipe;
mod search;

pub use recipe::{cook_time_minutes, RecipeSession};
pub use search::{limit_title, ResultsPage, SearchSession, TITLE_LIMIT};
