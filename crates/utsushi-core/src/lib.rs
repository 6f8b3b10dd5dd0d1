pub mod chain;
pub mod char;
pub mod recipe;
pub mod stages;
pub mod stream;
pub mod tables;
pub mod unicode;

#[cfg(test)]
mod tests;

pub use chain::{build_chain, BuildError, Chain, Transliterator};
pub use recipe::{parse_recipe_toml, Recipe, RecipeError};
pub use stages::StageConfig;

/// Compile `recipe` and run it over `text`.
///
/// Callers transliterating many strings with one recipe should build a
/// [`Chain`] once and reuse it.
pub fn transliterate(recipe: &Recipe, text: &str) -> Result<String, BuildError> {
    Ok(Chain::from_recipe(recipe)?.transliterate_str(text))
}
