use clap::{Parser, Subcommand};

use utsushi_cli::commands::{recipe_ops, run_ops};
use utsushi_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "utsushi", about = "Japanese text transliteration")]
struct Cli {
    /// Log stage construction and recipe compilation to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transliterate TEXT arguments, or stdin line by line
    Run {
        /// Recipe TOML file (default: the embedded standard recipe)
        #[arg(long)]
        recipe: Option<String>,
        /// JSON stage list as printed by `stages` (overrides --recipe)
        #[arg(long)]
        stages: Option<String>,
        /// Text to transliterate
        text: Vec<String>,
    },
    /// Print the embedded default recipe as TOML
    RecipeExport,
    /// Parse and compile a recipe file
    RecipeValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Print the compiled stage list as JSON
    Stages {
        /// Recipe TOML file (default: the embedded standard recipe)
        #[arg(long)]
        recipe: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Run {
            recipe,
            stages,
            text,
        } => run_ops::run(recipe.as_deref(), stages.as_deref(), &text),
        Command::RecipeExport => recipe_ops::recipe_export(),
        Command::RecipeValidate { file } => recipe_ops::recipe_validate(&file),
        Command::Stages { recipe } => recipe_ops::stages(recipe.as_deref()),
    }
}
