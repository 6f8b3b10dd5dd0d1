use std::fs;
use std::io;

use utsushi_core::{parse_recipe_toml, BuildError, Chain, Recipe, RecipeError, StageConfig};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod recipe_ops;
pub mod run_ops;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("invalid stage list in {path}: {source}")]
    Stages {
        path: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Recipe(#[from] RecipeError),
    #[error(transparent)]
    Build(#[from] BuildError),
}

fn read_file(path: &str) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_string(),
        source,
    })
}

/// Read a recipe from `path`, or fall back to the embedded standard recipe.
pub fn load_recipe(path: Option<&str>) -> Result<Recipe, CliError> {
    match path {
        Some(path) => Ok(parse_recipe_toml(&read_file(path)?)?),
        None => Ok(Recipe::standard()?),
    }
}

/// Read a JSON stage list as produced by `utsushi stages`.
pub fn load_stages(path: &str) -> Result<Vec<StageConfig>, CliError> {
    serde_json::from_str(&read_file(path)?).map_err(|source| CliError::Stages {
        path: path.to_string(),
        source,
    })
}

/// An explicit stage list takes precedence over any recipe.
pub fn load_chain(recipe: Option<&str>, stages: Option<&str>) -> Result<Chain, CliError> {
    let configs = match stages {
        Some(path) => load_stages(path)?,
        None => load_recipe(recipe)?.build_configs()?,
    };
    Ok(Chain::from_configs(&configs)?)
}
