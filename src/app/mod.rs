mod controller;
mod state;

pub use controller::Controller;
pub use state::AppState;

use crate::error::AppError;
use crate::model::{LikedRecipe, ListItem, RawRecipe, RecipeSummary};
use crate::pagination::PageSelection;
use crate::scaling::ServingsDirection;

/// User actions the application state reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Start a new search, superseding the current one
    NewQuery(String),
    /// Show another page of the current results
    GoToPage(u32),
    /// Open a recipe by id, superseding the current one
    Navigate(String),
    UpdateServings(ServingsDirection),
    /// Copy the current recipe's ingredients into the shopping list
    AddToList,
    /// Like or unlike the current recipe
    ToggleLike,
    ListEdit(ListEdit),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListEdit {
    Delete { id: String },
    UpdateCount { id: String, count: f64 },
}

/// Issued when a search starts; the load result must carry its generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub query: String,
}

/// Issued when a recipe load starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeTicket {
    pub generation: u64,
    pub id: String,
}

/// Result of an asynchronous load, tagged with the session that asked for it
#[derive(Debug)]
pub enum Completion {
    SearchLoaded {
        generation: u64,
        result: Result<Vec<RecipeSummary>, AppError>,
    },
    RecipeLoaded {
        generation: u64,
        result: Result<RawRecipe, AppError>,
    },
}

impl Completion {
    pub fn generation(&self) -> u64 {
        match self {
            Completion::SearchLoaded { generation, .. } => *generation,
            Completion::RecipeLoaded { generation, .. } => *generation,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LikeToggle {
    Liked(LikedRecipe),
    Unliked(LikedRecipe),
}

/// What a dispatched action did
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Blank query or recipe id, nothing started
    Ignored,
    SearchStarted(SearchTicket),
    RecipeStarted(RecipeTicket),
    PageChanged(PageSelection),
    ServingsChanged(u32),
    ItemsAdded(Vec<ListItem>),
    Like(LikeToggle),
    ListEdited,
}

/// What applying a completion did
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// The completion belonged to a superseded session
    Discarded,
    SearchResults { count: usize },
    Recipe { id: String, liked: bool },
}
