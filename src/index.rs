use crate::model::{CategoryEntry, CategoryHierarchy, RawCategory};
use crate::query::KeywordQuery;

/// Flattened, read-only list of every category across the three levels.
///
/// Entries keep provider order: large first, then medium, then small.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    entries: Vec<CategoryEntry>,
}

impl CategoryIndex {
    /// Flatten a category hierarchy.
    ///
    /// Records with a parent get the composite id `parent-child`, others keep
    /// their own id. Names are not deduplicated.
    ///
    /// # Example
    /// ```
    /// use recipe_finder::{CategoryHierarchy, CategoryIndex};
    ///
    /// let hierarchy: CategoryHierarchy = serde_json::from_str(
    ///     r#"{"medium": [{"categoryId": "10", "categoryName": "なすの煮物", "parentCategoryId": "5"}]}"#,
    /// ).unwrap();
    /// let index = CategoryIndex::build(&hierarchy);
    /// assert_eq!(index.entries()[0].id, "5-10");
    /// ```
    pub fn build(hierarchy: &CategoryHierarchy) -> Self {
        let entries = [&hierarchy.large, &hierarchy.medium, &hierarchy.small]
            .into_iter()
            .flatten()
            .map(to_entry)
            .collect();

        CategoryIndex { entries }
    }

    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry whose name contains all keywords, in index order.
    pub fn matching(&self, query: &KeywordQuery) -> Vec<CategoryEntry> {
        self.entries
            .iter()
            .filter(|entry| query.matches(&entry.name))
            .cloned()
            .collect()
    }
}

fn to_entry(raw: &RawCategory) -> CategoryEntry {
    let id = match &raw.parent_category_id {
        Some(parent) => format!("{}-{}", parent, raw.category_id),
        None => raw.category_id.clone(),
    };

    CategoryEntry {
        name: raw.category_name.clone(),
        id,
    }
}

/// First entry with exactly this name.
pub fn find_by_name<'a>(entries: &'a [CategoryEntry], name: &str) -> Option<&'a CategoryEntry> {
    entries.iter().find(|entry| entry.name == name)
}
