use std::process::ExitCode;

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::debug;
use serde_json::json;

use recipe_finder::index::find_by_name;
use recipe_finder::{
    render, CategoryEntry, FinderError, KeywordQuery, RecipeFinder, RecipeRecord, Settings,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Find popular recipes by ingredient keywords",
    long_about = None
)]
struct Args {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List categories whose names contain every keyword
    Categories {
        /// Ingredient or dish keywords (full-width spaces also separate)
        #[arg(required = true)]
        keywords: Vec<String>,
    },
    /// Show the popularity ranking of a matched category
    Ranking {
        /// Ingredient or dish keywords (full-width spaces also separate)
        #[arg(required = true)]
        keywords: Vec<String>,
        /// Use the N-th matched category (1-based, default 1)
        #[arg(long, conflicts_with = "category")]
        pick: Option<usize>,
        /// Use the matched category with exactly this name
        #[arg(long)]
        category: Option<String>,
        /// Forward the recipe with this id to the webhook
        #[arg(long, value_name = "RECIPE_ID")]
        send: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let finder = match Settings::load().and_then(|settings| RecipeFinder::from_settings(&settings)) {
        Ok(finder) => finder,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!(
                "Set RECIPE_FINDER__APPLICATION_ID and RECIPE_FINDER__WEBHOOK_URL \
                 (or RAKUTEN_APP_ID and DISCORD_WEBHOOK_URL), or add them to config.toml."
            );
            return ExitCode::from(2);
        }
    };

    match args.command {
        Commands::Categories { keywords } => categories(&finder, &keywords, args.json).await,
        Commands::Ranking {
            keywords,
            pick,
            category,
            send,
        } => {
            ranking(
                &finder,
                &keywords,
                pick,
                category.as_deref(),
                send.as_deref(),
                args.json,
            )
            .await
        }
    }
}

fn parse_query(keywords: &[String]) -> Option<KeywordQuery> {
    let query = KeywordQuery::parse(&keywords.join(" "));
    if query.is_none() {
        eprintln!("Enter at least one keyword, e.g. なす 豚肉");
    }
    query
}

async fn categories(finder: &RecipeFinder, keywords: &[String], as_json: bool) -> ExitCode {
    let Some(query) = parse_query(keywords) else {
        return ExitCode::from(2);
    };

    match finder.search(&query).await {
        Ok(entries) => {
            if as_json {
                println!("{:#}", json!({ "matches": entries }));
            } else {
                println!(
                    "Found {} categories for \"{}\":",
                    entries.len(),
                    query.phrase()
                );
                print!("{}", render::category_list(&entries));
            }
            ExitCode::SUCCESS
        }
        Err(e) => report(e, as_json),
    }
}

async fn ranking(
    finder: &RecipeFinder,
    keywords: &[String],
    pick: Option<usize>,
    category: Option<&str>,
    send: Option<&str>,
    as_json: bool,
) -> ExitCode {
    let Some(query) = parse_query(keywords) else {
        return ExitCode::from(2);
    };

    let entries = match finder.search(&query).await {
        Ok(entries) => entries,
        Err(e) => return report(e, as_json),
    };

    let selected = match choose(&entries, pick, category) {
        Ok(entry) => entry,
        Err(message) => {
            eprintln!("{}", message);
            eprint!("{}", render::category_list(&entries));
            return ExitCode::from(2);
        }
    };
    if entries.len() > 1 && pick.is_none() && category.is_none() && !as_json {
        eprintln!(
            "{} categories matched; showing \"{}\". Use --pick or --category to choose another.",
            entries.len(),
            selected.name
        );
    }

    let recipes = match finder.ranking(selected).await {
        Ok(recipes) => recipes,
        Err(e) => return report(e, as_json),
    };

    if as_json {
        println!("{:#}", json!({ "category": selected, "recipes": recipes }));
    } else {
        println!("Popular recipes in \"{}\":\n", selected.name);
        print!("{}", render::ranking(&recipes));
    }

    if let Some(recipe_id) = send {
        forward(finder, &recipes, recipe_id).await;
    }

    ExitCode::SUCCESS
}

fn choose<'a>(
    entries: &'a [CategoryEntry],
    pick: Option<usize>,
    category: Option<&str>,
) -> Result<&'a CategoryEntry, String> {
    if let Some(name) = category {
        return find_by_name(entries, name)
            .ok_or_else(|| format!("No matched category is named \"{}\".", name));
    }

    let position = pick.unwrap_or(1);
    position
        .checked_sub(1)
        .and_then(|i| entries.get(i))
        .ok_or_else(|| {
            format!(
                "--pick must be between 1 and {}, got {}.",
                entries.len(),
                position
            )
        })
}

/// Sending is best effort: failures are printed and never change the exit
/// status.
async fn forward(finder: &RecipeFinder, recipes: &[RecipeRecord], recipe_id: &str) {
    let Some(recipe) = recipes.iter().find(|r| r.id == recipe_id) else {
        eprintln!("Recipe {} is not in this ranking; nothing sent.", recipe_id);
        return;
    };

    match finder.send(recipe).await {
        Ok(()) => eprintln!("Sent \"{}\".", recipe.title),
        Err(e) => eprintln!("Notice: {}", e),
    }
}

/// Turn an action error into user-facing output.
fn report(error: FinderError, as_json: bool) -> ExitCode {
    debug!("Action ended with {:?}", error);

    match &error {
        FinderError::NoMatch {
            query,
            fallback_url,
        } => {
            if as_json {
                println!("{:#}", json!({ "matches": [], "fallbackUrl": fallback_url }));
            } else {
                println!("No category matched \"{}\". Try other words.", query);
                println!("Or search the recipe site directly: {}", fallback_url);
            }
            ExitCode::SUCCESS
        }
        FinderError::EmptyRanking {
            category,
            fallback_url,
        } => {
            if as_json {
                println!(
                    "{:#}",
                    json!({ "category": category, "recipes": [], "fallbackUrl": fallback_url })
                );
            } else {
                println!("There is no ranking for \"{}\" right now.", category);
                println!("Search the recipe site instead: {}", fallback_url);
            }
            ExitCode::SUCCESS
        }
        FinderError::Communication(e) => {
            eprintln!(
                "Could not reach the recipe service, please try again later. ({})",
                e
            );
            ExitCode::FAILURE
        }
        _ => {
            eprintln!("{}", error);
            if error.is_fatal() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
