use log::error;
use tokio::io::{AsyncBufReadExt, BufReader};

use recipe_box::session::{limit_title, TITLE_LIMIT};
use recipe_box::{
    Action, AppConfig, AppError, Applied, Controller, LikeToggle, ListEdit, Outcome,
    ServingsDirection,
};

const HELP: &str = "\
commands:
  search <query>      search recipes
  page <n>            show page n of the results
  open <id>           open a recipe
  more | less         change servings
  add                 add the recipe's ingredients to the shopping list
  like                like or unlike the open recipe
  list                show the shopping list
  rm <item-id>        remove a shopping list item
  count <item-id> <n> change a shopping list count
  likes               show liked recipes
  quit";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = AppConfig::load()?;
    let mut controller = recipe_box::start(&config).await?;
    print_likes(&controller);
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
        let arg = arg.trim();

        let action = match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{}", HELP);
                continue;
            }
            "list" => {
                print_list(&controller);
                continue;
            }
            "likes" => {
                print_likes(&controller);
                continue;
            }
            "search" => Action::NewQuery(arg.to_string()),
            "open" => Action::Navigate(arg.to_string()),
            "more" => Action::UpdateServings(ServingsDirection::Increase),
            "less" => Action::UpdateServings(ServingsDirection::Decrease),
            "add" => Action::AddToList,
            "like" => Action::ToggleLike,
            "rm" => Action::ListEdit(ListEdit::Delete { id: arg.to_string() }),
            "page" => match arg.parse() {
                Ok(page) => Action::GoToPage(page),
                Err(_) => {
                    println!("page needs a number");
                    continue;
                }
            },
            "count" => {
                let parsed = arg
                    .split_once(' ')
                    .and_then(|(id, n)| n.trim().parse::<f64>().ok().map(|n| (id, n)));
                match parsed {
                    Some((id, count)) => Action::ListEdit(ListEdit::UpdateCount {
                        id: id.to_string(),
                        count,
                    }),
                    None => {
                        println!("usage: count <item-id> <n>");
                        continue;
                    }
                }
            }
            other => {
                println!("unknown command {:?}, try help", other);
                continue;
            }
        };

        match controller.handle(action).await {
            Ok(outcome) => show_outcome(&mut controller, outcome).await,
            Err(e) if e.is_rejected() => println!("{}", e),
            Err(e) => {
                error!("{}", e);
                println!("Something went wrong: {}", e);
            }
        }
    }

    Ok(())
}

async fn show_outcome(controller: &mut Controller, outcome: Outcome) {
    match outcome {
        Outcome::Ignored => println!("nothing to do"),
        Outcome::SearchStarted(_) | Outcome::RecipeStarted(_) => {
            for result in controller.settle().await {
                match result {
                    Ok(Applied::SearchResults { .. }) => print_results(controller),
                    Ok(Applied::Recipe { .. }) => print_recipe(controller),
                    Ok(Applied::Discarded) => {}
                    Err(AppError::Fetch(msg)) => println!("Something went wrong: {}", msg),
                    Err(e) => println!("Error processing request: {}", e),
                }
            }
        }
        Outcome::PageChanged(_) => print_results(controller),
        Outcome::ServingsChanged(_) => print_recipe(controller),
        Outcome::ItemsAdded(_) | Outcome::ListEdited => print_list(controller),
        Outcome::Like(LikeToggle::Liked(like)) => println!("liked {}", like.title),
        Outcome::Like(LikeToggle::Unliked(like)) => println!("unliked {}", like.title),
    }
}

fn print_results(controller: &Controller) {
    let state = controller.state();
    let Ok(page) = state.results_page() else {
        return;
    };
    for summary in page.results {
        let marker = if state.is_selected(&summary.id) { ">" } else { " " };
        println!(
            "{} {:>8}  {:<20} {}",
            marker,
            summary.id,
            limit_title(&summary.title, TITLE_LIMIT),
            summary.publisher
        );
    }
    let nav: Vec<String> = page
        .selection
        .actions
        .iter()
        .map(|a| format!("{:?} -> page {}", a.direction, a.target))
        .collect();
    println!(
        "page {}/{}  {}",
        page.selection.page,
        page.selection.num_pages,
        nav.join("  ")
    );
}

fn print_recipe(controller: &Controller) {
    let state = controller.state();
    let Some(recipe) = state.recipe() else {
        return;
    };
    let heart = if state.is_current_recipe_liked() { " ♥" } else { "" };
    println!("{} by {}{}", recipe.title, recipe.author, heart);
    println!(
        "{} servings, about {} minutes",
        recipe.servings, recipe.cook_time_minutes
    );
    for line in &recipe.ingredients {
        println!("  {} {} {}", format_count(line.count), line.unit, line.ingredient);
    }
    if let Some(url) = &recipe.source_url {
        println!("directions: {}", url);
    }
}

fn print_list(controller: &Controller) {
    for item in controller.state().list().items() {
        println!(
            "  [{}] {} {} {}",
            item.id,
            format_count(item.count),
            item.unit,
            item.ingredient
        );
    }
}

fn print_likes(controller: &Controller) {
    let state = controller.state();
    if !state.likes_menu_visible() {
        return;
    }
    let likes = state.likes();
    println!("liked recipes:");
    for like in likes.likes() {
        println!("  {:>8}  {} ({})", like.id, like.title, like.author);
    }
}

fn format_count(count: Option<f64>) -> String {
    match count {
        Some(c) if c.fract() == 0.0 => format!("{}", c),
        Some(c) => format!("{:.2}", c),
        None => String::new(),
    }
}
