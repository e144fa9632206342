use serde::{Deserialize, Deserializer, Serialize};

/// Provider ids come back as JSON strings for some levels and integers for
/// others.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Number(i64),
}

fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Text(s) => s,
        IdRepr::Number(n) => n.to_string(),
    })
}

fn optional_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<IdRepr>::deserialize(deserializer)? {
        Some(IdRepr::Text(s)) => Some(s),
        Some(IdRepr::Number(n)) => Some(n.to_string()),
        None => None,
    })
}

/// One category record as returned by the category list endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCategory {
    #[serde(deserialize_with = "id_string")]
    pub category_id: String,
    pub category_name: String,
    #[serde(default, deserialize_with = "optional_id_string")]
    pub parent_category_id: Option<String>,
}

/// The three category levels, in provider order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CategoryHierarchy {
    #[serde(default)]
    pub large: Vec<RawCategory>,
    #[serde(default)]
    pub medium: Vec<RawCategory>,
    #[serde(default)]
    pub small: Vec<RawCategory>,
}

impl CategoryHierarchy {
    pub fn len(&self) -> usize {
        self.large.len() + self.medium.len() + self.small.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryListResponse {
    #[serde(default)]
    pub result: CategoryHierarchy,
}

/// A searchable category with the id the ranking endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub name: String,
    pub id: String,
}

/// A recipe from a category ranking, passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    #[serde(rename = "recipeId", deserialize_with = "id_string")]
    pub id: String,
    #[serde(rename = "recipeTitle", default)]
    pub title: String,
    #[serde(rename = "recipeUrl", default)]
    pub url: String,
    #[serde(rename = "foodImageUrl", default)]
    pub image_url: String,
    #[serde(rename = "recipeDescription", default)]
    pub description: String,
    #[serde(rename = "recipeIndication", default)]
    pub cooking_time: String,
    #[serde(rename = "recipeCost", default)]
    pub cost: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RankingResponse {
    #[serde(default)]
    pub result: Vec<RecipeRecord>,
}
