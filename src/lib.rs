pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod fallback;
pub mod finder;
pub mod index;
pub mod model;
pub mod notify;
pub mod query;
pub mod render;

pub use cache::IndexCache;
pub use client::RakutenClient;
pub use config::Settings;
pub use error::FinderError;
pub use finder::{RecipeFinder, RecipeFinderBuilder};
pub use index::CategoryIndex;
pub use model::{CategoryEntry, CategoryHierarchy, RawCategory, RecipeRecord};
pub use notify::{DiscordWebhook, Notifier};
pub use query::KeywordQuery;

