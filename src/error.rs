use thiserror::Error;

/// Errors that can occur while searching categories, fetching rankings or
/// forwarding a recipe.
#[derive(Error, Debug)]
pub enum FinderError {
    /// Required settings are missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Configuration sources could not be read or deserialized
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Network or decode failure talking to the recipe provider
    #[error("Communication error: {0}")]
    Communication(#[from] reqwest::Error),

    /// The provider answered with no categories at all
    #[error("Category list came back empty")]
    EmptyCategories,

    /// The keywords did not match any category
    #[error("No category matched \"{query}\"")]
    NoMatch { query: String, fallback_url: String },

    /// The category exists but the provider has no ranking for it
    #[error("No ranking data for category \"{category}\"")]
    EmptyRanking {
        category: String,
        fallback_url: String,
    },

    /// Posting to the webhook failed
    #[error("Failed to send notification: {0}")]
    Notification(String),
}

impl FinderError {
    /// Only configuration problems stop the program; everything else is
    /// reported at the end of the action that triggered it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FinderError::Configuration(_) | FinderError::Config(_))
    }

    /// Search page to offer instead of a ranking, if this error carries one.
    pub fn fallback_url(&self) -> Option<&str> {
        match self {
            FinderError::NoMatch { fallback_url, .. }
            | FinderError::EmptyRanking { fallback_url, .. } => Some(fallback_url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_configuration_is_fatal() {
        assert!(FinderError::Configuration("missing".to_string()).is_fatal());
        assert!(!FinderError::Notification("boom".to_string()).is_fatal());
        assert!(!FinderError::NoMatch {
            query: "なす".to_string(),
            fallback_url: "https://example.com/search/%E3%81%AA%E3%81%99/".to_string(),
        }
        .is_fatal());
    }

    #[test]
    fn test_fallback_url_accessor() {
        let err = FinderError::EmptyRanking {
            category: "なすの煮物".to_string(),
            fallback_url: "https://example.com/x/".to_string(),
        };
        assert_eq!(err.fallback_url(), Some("https://example.com/x/"));
        assert_eq!(
            FinderError::Notification("boom".to_string()).fallback_url(),
            None
        );
    }
}
