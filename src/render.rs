use crate::model::{CategoryEntry, RecipeRecord};

/// Numbered list of matched categories, one per line.
pub fn category_list(entries: &[CategoryEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(position, entry)| format!("{:>3}. {} [{}]\n", position + 1, entry.name, entry.id))
        .collect()
}

/// A text card for one ranked recipe.
pub fn recipe_card(rank: usize, recipe: &RecipeRecord) -> String {
    let mut out = format!("#{} {}\n", rank, recipe.title);
    if !recipe.description.is_empty() {
        out.push_str(&format!("    {}\n", recipe.description));
    }
    out.push_str(&format!(
        "    Time:  {}\n    Cost:  {}\n    Link:  {}\n",
        or_unknown(&recipe.cooking_time),
        or_unknown(&recipe.cost),
        recipe.url
    ));
    if !recipe.image_url.is_empty() {
        out.push_str(&format!("    Image: {}\n", recipe.image_url));
    }
    out.push_str(&format!("    Id:    {}\n", recipe.id));
    out
}

/// All recipes of a ranking, separated by blank lines.
pub fn ranking(recipes: &[RecipeRecord]) -> String {
    recipes
        .iter()
        .enumerate()
        .map(|(i, recipe)| recipe_card(i + 1, recipe))
        .collect::<Vec<_>>()
        .join("\n")
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
