use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};

use crate::cache::{IndexCache, DEFAULT_TTL};
use crate::client::{RakutenClient, DEFAULT_CATEGORY_LIST_URL, DEFAULT_RANKING_URL};
use crate::config::Settings;
use crate::fallback::{search_url, DEFAULT_SEARCH_BASE_URL};
use crate::index::CategoryIndex;
use crate::model::{CategoryEntry, RecipeRecord};
use crate::notify::{DiscordWebhook, Notifier};
use crate::query::KeywordQuery;
use crate::FinderError;

/// Builder for configuring a [`RecipeFinder`]
#[derive(Default)]
pub struct RecipeFinderBuilder {
    application_id: Option<String>,
    webhook_url: Option<String>,
    timeout: Option<Duration>,
    category_list_url: Option<String>,
    ranking_url: Option<String>,
    search_base_url: Option<String>,
    cache_ttl: Option<Duration>,
    cache: Option<Arc<IndexCache>>,
    notifier: Option<Box<dyn Notifier>>,
}

impl RecipeFinderBuilder {
    /// Set the recipe provider application id (required)
    pub fn application_id(mut self, id: impl Into<String>) -> Self {
        self.application_id = Some(id.into());
        self
    }

    /// Set the webhook that receives forwarded recipes (required unless a
    /// custom notifier is supplied)
    pub fn webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    /// use std::time::Duration;
    ///
    /// let finder = RecipeFinder::builder()
    ///     .application_id("app-id")
    ///     .webhook_url("https://discord.com/api/webhooks/1/token")
    ///     .timeout(Duration::from_secs(10))
    ///     .build();
    /// assert!(finder.is_ok());
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn category_list_url(mut self, url: impl Into<String>) -> Self {
        self.category_list_url = Some(url.into());
        self
    }

    pub fn ranking_url(mut self, url: impl Into<String>) -> Self {
        self.ranking_url = Some(url.into());
        self
    }

    /// Base of the public search page used for fallback links
    pub fn search_base_url(mut self, url: impl Into<String>) -> Self {
        self.search_base_url = Some(url.into());
        self
    }

    /// How long a fetched category index is reused. Ignored when a shared
    /// cache is supplied.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    /// Share one category index cache between several finders
    pub fn shared_cache(mut self, cache: Arc<IndexCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Forward recipes somewhere other than the webhook
    pub fn notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Validate the configuration and build the finder
    ///
    /// # Errors
    /// Returns `FinderError::Configuration` if the application id is missing,
    /// or if neither a webhook url nor a notifier was given.
    pub fn build(self) -> Result<RecipeFinder, FinderError> {
        let application_id = self
            .application_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                FinderError::Configuration("application id is required".to_string())
            })?;

        let notifier = match (self.notifier, self.webhook_url) {
            (Some(notifier), _) => notifier,
            (None, Some(url)) if !url.trim().is_empty() => {
                Box::new(DiscordWebhook::new(url, self.timeout)?) as Box<dyn Notifier>
            }
            (None, _) => {
                return Err(FinderError::Configuration(
                    "webhook url is required".to_string(),
                ))
            }
        };

        let client = RakutenClient::with_endpoints(
            application_id,
            self.category_list_url
                .unwrap_or_else(|| DEFAULT_CATEGORY_LIST_URL.to_string()),
            self.ranking_url
                .unwrap_or_else(|| DEFAULT_RANKING_URL.to_string()),
            self.timeout,
        )?;

        let cache = self.cache.unwrap_or_else(|| {
            Arc::new(IndexCache::new(self.cache_ttl.unwrap_or(DEFAULT_TTL)))
        });

        Ok(RecipeFinder {
            client,
            notifier,
            cache,
            search_base_url: self
                .search_base_url
                .unwrap_or_else(|| DEFAULT_SEARCH_BASE_URL.to_string()),
        })
    }
}

/// Searches categories by keyword, fetches rankings and forwards picks.
pub struct RecipeFinder {
    client: RakutenClient,
    notifier: Box<dyn Notifier>,
    cache: Arc<IndexCache>,
    search_base_url: String,
}

impl RecipeFinder {
    pub fn builder() -> RecipeFinderBuilder {
        RecipeFinderBuilder::default()
    }

    /// Build a finder from validated settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, FinderError> {
        settings.validate()?;

        RecipeFinder::builder()
            .application_id(settings.application_id.clone())
            .webhook_url(settings.webhook_url.clone())
            .timeout(Duration::from_secs(settings.timeout))
            .cache_ttl(settings.cache_ttl())
            .category_list_url(settings.endpoints.category_list_url.clone())
            .ranking_url(settings.endpoints.ranking_url.clone())
            .search_base_url(settings.endpoints.search_base_url.clone())
            .build()
    }

    /// The category index, fetched and built on first use and reused until
    /// the cache expires.
    ///
    /// A failed fetch yields an empty index so searches report "no match"
    /// instead of failing. Empty results are not cached.
    pub async fn category_index(&self) -> Arc<CategoryIndex> {
        match self.cache.get_or_load(self.load_index()).await {
            Ok(index) => index,
            Err(e) => {
                warn!("Failed to load categories: {}", e);
                Arc::new(CategoryIndex::default())
            }
        }
    }

    async fn load_index(&self) -> Result<CategoryIndex, FinderError> {
        let hierarchy = self.client.fetch_categories().await?;
        let index = CategoryIndex::build(&hierarchy);
        if index.is_empty() {
            return Err(FinderError::EmptyCategories);
        }
        info!("Built category index with {} entries", index.len());
        Ok(index)
    }

    /// Categories whose names contain every keyword.
    ///
    /// # Errors
    /// `FinderError::NoMatch` with a search-page link for the whole phrase
    /// when nothing matches.
    pub async fn search(&self, query: &KeywordQuery) -> Result<Vec<CategoryEntry>, FinderError> {
        let index = self.category_index().await;
        let matches = index.matching(query);

        if matches.is_empty() {
            let phrase = query.phrase();
            return Err(FinderError::NoMatch {
                fallback_url: search_url(&self.search_base_url, &phrase),
                query: phrase,
            });
        }

        info!("\"{}\" matched {} categories", query.phrase(), matches.len());
        Ok(matches)
    }

    /// Popularity ranking for a category, in provider order.
    ///
    /// # Errors
    /// - `FinderError::EmptyRanking` with a search-page link for the category
    ///   name when the provider has no ranking
    /// - `FinderError::Communication` when the request fails
    pub async fn ranking(&self, category: &CategoryEntry) -> Result<Vec<RecipeRecord>, FinderError> {
        let recipes = self.client.fetch_ranking(&category.id).await?;

        if recipes.is_empty() {
            return Err(FinderError::EmptyRanking {
                category: category.name.clone(),
                fallback_url: search_url(&self.search_base_url, &category.name),
            });
        }

        Ok(recipes)
    }

    /// Forward one recipe to the configured notifier.
    pub async fn send(&self, recipe: &RecipeRecord) -> Result<(), FinderError> {
        self.notifier.notify(recipe).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_application_id() {
        let result = RecipeFinder::builder()
            .webhook_url("https://discord.example.com/webhook")
            .build();
        match result {
            Err(FinderError::Configuration(message)) => {
                assert!(message.contains("application id"))
            }
            _ => panic!("Expected configuration error"),
        }
    }

    #[test]
    fn test_build_requires_webhook_or_notifier() {
        let result = RecipeFinder::builder().application_id("app").build();
        match result {
            Err(FinderError::Configuration(message)) => assert!(message.contains("webhook")),
            _ => panic!("Expected configuration error"),
        }

        let result = RecipeFinder::builder()
            .application_id("app")
            .webhook_url("  ")
            .build();
        assert!(matches!(result, Err(FinderError::Configuration(_))));
    }

    #[test]
    fn test_from_settings_rejects_missing_secrets() {
        let settings = Settings {
            application_id: String::new(),
            webhook_url: String::new(),
            timeout: 30,
            cache_ttl_hours: 24,
            endpoints: Default::default(),
        };
        let err = RecipeFinder::from_settings(&settings).err().unwrap();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_from_settings_rejects_oversized_cache_ttl() {
        let settings = Settings {
            application_id: "app".to_string(),
            webhook_url: "https://discord.example.com/webhook".to_string(),
            timeout: 30,
            cache_ttl_hours: u64::MAX / 1000,
            endpoints: Default::default(),
        };
        match RecipeFinder::from_settings(&settings) {
            Err(FinderError::Configuration(message)) => {
                assert!(message.contains("cache_ttl_hours"))
            }
            _ => panic!("Expected configuration error"),
        }
    }
}
