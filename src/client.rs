use crate::error::FinderError;
use crate::model::{CategoryHierarchy, CategoryListResponse, RankingResponse, RecipeRecord};
use log::debug;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_CATEGORY_LIST_URL: &str =
    "https://app.rakuten.co.jp/services/api/Recipe/CategoryList/20170426";
pub const DEFAULT_RANKING_URL: &str =
    "https://app.rakuten.co.jp/services/api/Recipe/CategoryRanking/20170426";

/// HTTP client for the two read-only recipe provider endpoints.
pub struct RakutenClient {
    client: Client,
    application_id: String,
    category_list_url: String,
    ranking_url: String,
}

impl RakutenClient {
    /// Create a client against the public provider endpoints.
    pub fn new(application_id: String, timeout: Option<Duration>) -> Result<Self, FinderError> {
        Self::with_endpoints(
            application_id,
            DEFAULT_CATEGORY_LIST_URL.to_string(),
            DEFAULT_RANKING_URL.to_string(),
            timeout,
        )
    }

    /// Create a client against custom endpoints (proxies, test servers).
    pub fn with_endpoints(
        application_id: String,
        category_list_url: String,
        ranking_url: String,
        timeout: Option<Duration>,
    ) -> Result<Self, FinderError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("recipe-finder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(RakutenClient {
            client,
            application_id,
            category_list_url,
            ranking_url,
        })
    }

    /// Fetch the full large/medium/small category hierarchy.
    pub async fn fetch_categories(&self) -> Result<CategoryHierarchy, FinderError> {
        debug!("Fetching category list from {}", self.category_list_url);

        let response = self
            .client
            .get(&self.category_list_url)
            .query(&[
                ("format", "json"),
                ("applicationId", self.application_id.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: CategoryListResponse = response.json().await?;
        debug!("Received {} categories", body.result.len());
        Ok(body.result)
    }

    /// Fetch the popularity ranking for one category, in provider order.
    ///
    /// An empty list is a valid answer, not an error.
    pub async fn fetch_ranking(&self, category_id: &str) -> Result<Vec<RecipeRecord>, FinderError> {
        debug!("Fetching ranking for category {}", category_id);

        let response = self
            .client
            .get(&self.ranking_url)
            .query(&[
                ("format", "json"),
                ("categoryId", category_id),
                ("applicationId", self.application_id.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: RankingResponse = response.json().await?;
        debug!("Category {} has {} ranked recipes", category_id, body.result.len());
        Ok(body.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn client_for(server: &Server) -> RakutenClient {
        RakutenClient::with_endpoints(
            "test-app-id".to_string(),
            format!("{}/CategoryList", server.url()),
            format!("{}/CategoryRanking", server.url()),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_categories_sends_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/CategoryList")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("format".into(), "json".into()),
                Matcher::UrlEncoded("applicationId".into(), "test-app-id".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"result": {
                    "large": [{"categoryId": "10", "categoryName": "肉"}],
                    "medium": [],
                    "small": []
                }}"#,
            )
            .create_async()
            .await;

        let hierarchy = client_for(&server).fetch_categories().await.unwrap();
        assert_eq!(hierarchy.large.len(), 1);
        assert_eq!(hierarchy.large[0].category_name, "肉");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_ranking_preserves_order() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/CategoryRanking")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("format".into(), "json".into()),
                Matcher::UrlEncoded("categoryId".into(), "5-10".into()),
                Matcher::UrlEncoded("applicationId".into(), "test-app-id".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"result": [
                    {"recipeId": 3, "recipeTitle": "三番目に作られた一位"},
                    {"recipeId": 1, "recipeTitle": "二位"}
                ]}"#,
            )
            .create_async()
            .await;

        let recipes = client_for(&server).fetch_ranking("5-10").await.unwrap();
        let ids: Vec<&str> = recipes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["3", "1"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_ranking_http_error_is_communication_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/CategoryRanking")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error": "wrong_parameter"}"#)
            .create_async()
            .await;

        let result = client_for(&server).fetch_ranking("bogus").await;
        assert!(matches!(result, Err(FinderError::Communication(_))));
    }

    #[tokio::test]
    async fn test_fetch_ranking_bad_json_is_communication_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/CategoryRanking")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let result = client_for(&server).fetch_ranking("5-10").await;
        assert!(matches!(result, Err(FinderError::Communication(_))));
    }
}
