mod common;

use std::sync::Arc;

use common::{pasta, pizza_dough, summaries};
use recipe_box::app::{Completion, SearchTicket};
use recipe_box::likes::LIKES_KEY;
use recipe_box::{
    Action, AppConfig, AppError, AppState, Applied, InvariantViolation, KeyValueStore,
    LikeToggle, LikesStore, ListEdit, MemoryStore, Outcome, PageDirection, ServingsDirection,
};

fn new_state() -> (AppState, Arc<MemoryStore>) {
    let storage = Arc::new(MemoryStore::new());
    let likes = LikesStore::new(storage.clone(), LIKES_KEY);
    (AppState::new(likes), storage)
}

fn open_recipe(state: &mut AppState, raw: recipe_box::RawRecipe) {
    let ticket = state.begin_recipe(&raw.id).unwrap();
    state
        .apply(Completion::RecipeLoaded {
            generation: ticket.generation,
            result: Ok(raw),
        })
        .unwrap();
}

#[tokio::test]
async fn test_search_then_page() {
    let (mut state, _) = new_state();

    let outcome = state.dispatch(Action::NewQuery("pizza".into())).await.unwrap();
    let Outcome::SearchStarted(SearchTicket { generation, query }) = outcome else {
        panic!("expected search to start");
    };
    assert_eq!(query, "pizza");

    let applied = state
        .apply(Completion::SearchLoaded {
            generation,
            result: Ok(summaries("pizza", 25)),
        })
        .unwrap();
    assert_eq!(applied, Applied::SearchResults { count: 25 });

    let page = state.results_page().unwrap();
    assert_eq!(page.results.len(), 10);
    assert_eq!(page.selection.actions.len(), 1);
    assert_eq!(page.selection.actions[0].direction, PageDirection::Next);

    let outcome = state.dispatch(Action::GoToPage(3)).await.unwrap();
    let Outcome::PageChanged(selection) = outcome else {
        panic!("expected page change");
    };
    assert_eq!(selection.prev(), Some(2));
    assert_eq!(selection.next(), None);
    let page = state.results_page().unwrap();
    assert_eq!(page.results.len(), 5);
    assert_eq!(page.results[0].id, "pizza-20");
}

#[tokio::test]
async fn test_page_beyond_results_is_rejected() {
    let (mut state, _) = new_state();
    let ticket = state.begin_search("pizza").unwrap();
    state
        .apply(Completion::SearchLoaded {
            generation: ticket.generation,
            result: Ok(summaries("pizza", 25)),
        })
        .unwrap();

    for page in [4, u32::MAX] {
        assert!(matches!(
            state.dispatch(Action::GoToPage(page)).await,
            Err(AppError::PageOutOfRange { num_pages: 3, .. })
        ));
    }
    assert!(matches!(
        state.dispatch(Action::GoToPage(0)).await,
        Err(AppError::InvalidPage { page: 0, page_size: 10 })
    ));
    assert_eq!(state.search().unwrap().current_page(), 1);
    assert_eq!(state.results_page().unwrap().results.len(), 10);
}

#[tokio::test]
async fn test_blank_query_is_ignored() {
    let (mut state, _) = new_state();
    assert_eq!(
        state.dispatch(Action::NewQuery("   ".into())).await.unwrap(),
        Outcome::Ignored
    );
    assert!(state.search().is_none());
}

#[test]
fn test_stale_search_result_is_discarded() {
    let (mut state, _) = new_state();
    let first = state.begin_search("pizza").unwrap();
    let second = state.begin_search("pasta").unwrap();

    let applied = state
        .apply(Completion::SearchLoaded {
            generation: first.generation,
            result: Ok(summaries("pizza", 3)),
        })
        .unwrap();
    assert_eq!(applied, Applied::Discarded);
    assert_eq!(state.search().unwrap().query(), "pasta");
    assert!(!state.search().unwrap().is_loaded());

    state
        .apply(Completion::SearchLoaded {
            generation: second.generation,
            result: Ok(summaries("pasta", 2)),
        })
        .unwrap();
    assert_eq!(state.search().unwrap().results()[0].id, "pasta-0");
}

#[test]
fn test_failed_search_surfaces_error() {
    let (mut state, _) = new_state();
    let ticket = state.begin_search("pizza").unwrap();
    let result = state.apply(Completion::SearchLoaded {
        generation: ticket.generation,
        result: Err(AppError::Fetch("offline".into())),
    });
    assert!(matches!(result, Err(AppError::Fetch(_))));
    assert!(state.search().unwrap().results().is_empty());
}

#[test]
fn test_stale_recipe_is_discarded() {
    let (mut state, _) = new_state();
    let first = state.begin_recipe("47746").unwrap();
    let second = state.begin_recipe("54388").unwrap();

    assert_eq!(
        state
            .apply(Completion::RecipeLoaded {
                generation: first.generation,
                result: Ok(pizza_dough()),
            })
            .unwrap(),
        Applied::Discarded
    );
    assert!(state.recipe().is_none());

    let applied = state
        .apply(Completion::RecipeLoaded {
            generation: second.generation,
            result: Ok(pasta()),
        })
        .unwrap();
    assert_eq!(
        applied,
        Applied::Recipe {
            id: "54388".into(),
            liked: false
        }
    );
    assert_eq!(state.recipe().unwrap().title, "Pasta with Tomato Cream Sauce");
}

#[test]
fn test_navigation_clears_previous_recipe() {
    let (mut state, _) = new_state();
    open_recipe(&mut state, pizza_dough());
    assert!(state.recipe().is_some());

    let ticket = state.begin_recipe("54388").unwrap();
    assert!(state.recipe().is_none());
    assert!(state.is_selected("54388"));
    assert!(!state.is_selected("47746"));

    let result = state.apply(Completion::RecipeLoaded {
        generation: ticket.generation,
        result: Err(AppError::Fetch("not found".into())),
    });
    assert!(result.is_err());
    assert!(state.recipe().is_none());
}

#[test]
fn test_loaded_recipe_derived_fields() {
    let (mut state, _) = new_state();
    open_recipe(&mut state, pizza_dough());
    let recipe = state.recipe().unwrap();
    assert_eq!(recipe.servings, 4);
    assert_eq!(recipe.cook_time_minutes, 30);
    assert_eq!(recipe.ingredients[0].count, Some(4.5));
    assert_eq!(recipe.ingredients[0].unit, "cup");
    assert_eq!(recipe.ingredients[1].unit, "tsp");
    assert_eq!(recipe.ingredients[2].ingredient, "olive oil");
    assert_eq!(recipe.ingredients[3].count, None);
}

#[tokio::test]
async fn test_add_to_list_uses_scaled_counts_in_order() {
    let (mut state, _) = new_state();
    open_recipe(&mut state, pasta());

    assert_eq!(
        state
            .dispatch(Action::UpdateServings(ServingsDirection::Increase))
            .await
            .unwrap(),
        Outcome::ServingsChanged(5)
    );

    let Outcome::ItemsAdded(items) = state.dispatch(Action::AddToList).await.unwrap() else {
        panic!("expected items");
    };
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].ingredient, "pasta");
    assert_eq!(items[0].count, Some(1.25));
    assert_eq!(items[1].ingredient, "tomato sauce");
    assert_eq!(items[1].count, Some(2.5));
    assert_eq!(state.list().len(), 2);

    // the list does not follow later rescaling
    state.update_servings(ServingsDirection::Decrease).unwrap();
    assert_eq!(state.list().items()[0].count, Some(1.25));
}

#[tokio::test]
async fn test_list_edits() {
    let (mut state, _) = new_state();
    open_recipe(&mut state, pasta());
    state.add_to_list().unwrap();
    let id = state.list().items()[0].id.clone();

    state
        .dispatch(Action::ListEdit(ListEdit::UpdateCount {
            id: id.clone(),
            count: 3.0,
        }))
        .await
        .unwrap();
    assert_eq!(state.list().get(&id).unwrap().count, Some(3.0));

    let missing = state
        .dispatch(Action::ListEdit(ListEdit::Delete {
            id: "missing".into(),
        }))
        .await
        .unwrap();
    assert_eq!(missing, Outcome::ListEdited);
    assert_eq!(state.list().len(), 2);

    assert!(matches!(
        state
            .dispatch(Action::ListEdit(ListEdit::UpdateCount {
                id: "missing".into(),
                count: 1.0,
            }))
            .await,
        Err(AppError::Rejected(InvariantViolation::UnknownListItem(_)))
    ));

    state
        .dispatch(Action::ListEdit(ListEdit::Delete { id: id.clone() }))
        .await
        .unwrap();
    assert_eq!(state.list().len(), 1);
    assert!(state.list().get(&id).is_none());
}

#[tokio::test]
async fn test_toggle_like_writes_through() {
    let (mut state, storage) = new_state();
    open_recipe(&mut state, pizza_dough());
    assert!(!state.likes_menu_visible());

    let Outcome::Like(LikeToggle::Liked(like)) =
        state.dispatch(Action::ToggleLike).await.unwrap()
    else {
        panic!("expected like");
    };
    assert_eq!(like.id, "47746");
    assert_eq!(like.author, "101 Cookbooks");
    assert!(state.is_current_recipe_liked());
    assert!(state.likes_menu_visible());

    let stored = storage.get(LIKES_KEY).await.unwrap().unwrap();
    assert!(String::from_utf8(stored).unwrap().contains("47746"));

    let outcome = state.dispatch(Action::ToggleLike).await.unwrap();
    assert!(matches!(outcome, Outcome::Like(LikeToggle::Unliked(_))));
    assert!(!state.is_current_recipe_liked());
    assert_eq!(storage.get(LIKES_KEY).await.unwrap(), Some(b"[]".to_vec()));
}

#[tokio::test]
async fn test_servings_floor_with_single_serving_default() {
    let storage = Arc::new(MemoryStore::new());
    let config = AppConfig {
        default_servings: 1,
        ..AppConfig::default()
    };
    let mut state = AppState::with_config(LikesStore::new(storage, LIKES_KEY), &config);
    open_recipe(&mut state, pasta());

    let result = state
        .dispatch(Action::UpdateServings(ServingsDirection::Decrease))
        .await;
    assert!(matches!(
        result,
        Err(AppError::Rejected(InvariantViolation::ServingsAtMinimum))
    ));
    let recipe = state.recipe().unwrap();
    assert_eq!(recipe.servings, 1);
    assert_eq!(recipe.ingredients[0].count, Some(1.0));
}

#[tokio::test]
async fn test_actions_without_session() {
    let (mut state, _) = new_state();
    assert!(matches!(
        state.dispatch(Action::GoToPage(2)).await,
        Err(AppError::NoActiveSearch)
    ));
    assert!(matches!(
        state.dispatch(Action::AddToList).await,
        Err(AppError::NoActiveRecipe)
    ));
    assert!(matches!(
        state.dispatch(Action::ToggleLike).await,
        Err(AppError::NoActiveRecipe)
    ));
    assert!(matches!(
        state
            .dispatch(Action::UpdateServings(ServingsDirection::Increase))
            .await,
        Err(AppError::NoActiveRecipe)
    ));
}
