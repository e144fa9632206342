/// Public recipe search page used when there is no ranking to show.
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://recipe.rakuten.co.jp/search";

/// Build `<base>/<percent-encoded phrase>/`.
///
/// # Example
/// ```
/// use recipe_finder::fallback::search_url;
///
/// assert_eq!(
///     search_url("https://recipe.rakuten.co.jp/search", "なす"),
///     "https://recipe.rakuten.co.jp/search/%E3%81%AA%E3%81%99/"
/// );
/// ```
pub fn search_url(base: &str, phrase: &str) -> String {
    format!(
        "{}/{}/",
        base.trim_end_matches('/'),
        urlencoding::encode(phrase)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_on_base_is_not_doubled() {
        assert_eq!(
            search_url("https://example.com/search/", "pasta"),
            "https://example.com/search/pasta/"
        );
    }

    #[test]
    fn test_phrase_is_path_safe() {
        let url = search_url(DEFAULT_SEARCH_BASE_URL, "なす 豚肉/ひき肉?");
        assert_eq!(
            url,
            "https://recipe.rakuten.co.jp/search/%E3%81%AA%E3%81%99%20%E8%B1%9A%E8%82%89%2F%E3%81%B2%E3%81%8D%E8%82%89%3F/"
        );
    }
}
