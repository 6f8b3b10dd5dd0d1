use utsushi_core::Recipe;

use super::{load_chain, load_recipe};

pub fn recipe_export() {
    print!("{}", Recipe::default_toml());
}

pub fn recipe_validate(file: &str) {
    let chain = die!(load_chain(Some(file), None), "Error: {}");
    let names: Vec<_> = chain.stage_names().collect();
    println!("OK: {} stages ({})", chain.len(), names.join(", "));
}

pub fn stages(recipe: Option<&str>) {
    let recipe = die!(load_recipe(recipe), "Error: {}");
    let configs = die!(recipe.build_configs(), "Error: {}");
    let json = die!(serde_json::to_string_pretty(&configs), "Error: {}");
    println!("{json}");
}
