/// Separators accepted between keywords: ASCII space and the full-width
/// (ideographic) space Japanese IMEs produce.
const SEPARATORS: [char; 2] = [' ', '\u{3000}'];

/// A non-empty list of non-empty search keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordQuery {
    keywords: Vec<String>,
}

impl KeywordQuery {
    /// Split raw user input into keywords.
    ///
    /// Returns `None` when the input holds nothing but separators.
    ///
    /// # Example
    /// ```
    /// use recipe_finder::KeywordQuery;
    ///
    /// let query = KeywordQuery::parse("なす　豚肉").unwrap();
    /// assert_eq!(query.keywords(), ["なす", "豚肉"]);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let keywords: Vec<String> = raw
            .split(|c: char| SEPARATORS.contains(&c))
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();

        if keywords.is_empty() {
            None
        } else {
            Some(KeywordQuery { keywords })
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Keywords joined back with single ASCII spaces.
    pub fn phrase(&self) -> String {
        self.keywords.join(" ")
    }

    /// True when every keyword occurs in `name` (case-sensitive substring).
    pub fn matches(&self, name: &str) -> bool {
        self.keywords.iter().all(|keyword| name.contains(keyword.as_str()))
    }
}
