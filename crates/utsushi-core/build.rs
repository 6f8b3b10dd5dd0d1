fn main() {
    // Validate embedded TOML files at compile time.
    validate_toml(
        "src/recipe/default_recipe.toml",
        include_str!("src/recipe/default_recipe.toml"),
    );
    for (path, content) in [
        ("spaces.toml", include_str!("src/tables/data/spaces.toml")),
        ("radicals.toml", include_str!("src/tables/data/radicals.toml")),
        (
            "mathematical_alphanumerics.toml",
            include_str!("src/tables/data/mathematical_alphanumerics.toml"),
        ),
        (
            "ideographic_annotations.toml",
            include_str!("src/tables/data/ideographic_annotations.toml"),
        ),
        (
            "roman_numerals.toml",
            include_str!("src/tables/data/roman_numerals.toml"),
        ),
        ("combined.toml", include_str!("src/tables/data/combined.toml")),
        (
            "circled_or_squared.toml",
            include_str!("src/tables/data/circled_or_squared.toml"),
        ),
        ("hyphens.toml", include_str!("src/tables/data/hyphens.toml")),
        (
            "kanji_old_new.toml",
            include_str!("src/tables/data/kanji_old_new.toml"),
        ),
        (
            "ivs_svs_base.toml",
            include_str!("src/tables/data/ivs_svs_base.toml"),
        ),
    ] {
        validate_toml(path, content);
    }
}

fn validate_toml(path: &str, content: &str) {
    if content.parse::<toml::Value>().is_err() {
        panic!("{path} contains invalid TOML");
    }
}
