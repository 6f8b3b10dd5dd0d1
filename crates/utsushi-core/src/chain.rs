//! Stage composition.

use tracing::{debug, debug_span};

use crate::char::CharArena;
use crate::recipe::{Recipe, RecipeError};
use crate::stages::StageConfig;
use crate::stream::{render, ArrayStream, BoxStream};

/// A stream-to-stream transform.
///
/// Implementations hold only immutable configuration and shared tables, so
/// one instance can serve any number of concurrent invocations. Per-call
/// state lives in the stream returned by [`Transliterator::transliterate`].
pub trait Transliterator: Send + Sync {
    fn transliterate<'a>(&'a self, input: BoxStream<'a>) -> BoxStream<'a>;

    /// Stage identifier, as used in [`StageConfig`].
    fn name(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("at least one transliterator must be specified")]
    Empty,
    #[error(transparent)]
    Recipe(#[from] RecipeError),
}

/// Stages applied left to right.
pub struct Chain {
    stages: Vec<Box<dyn Transliterator>>,
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("stages", &self.stage_names().collect::<Vec<_>>())
            .finish()
    }
}

impl Chain {
    pub fn new(stages: Vec<Box<dyn Transliterator>>) -> Result<Self, BuildError> {
        if stages.is_empty() {
            return Err(BuildError::Empty);
        }
        Ok(Self { stages })
    }

    pub fn from_configs(configs: &[StageConfig]) -> Result<Self, BuildError> {
        let _span = debug_span!("build_chain", stages = configs.len()).entered();
        Self::new(configs.iter().map(StageConfig::build).collect())
    }

    /// Compile `recipe` and build its stages.
    ///
    /// A recipe that enables nothing yields an empty chain, which is
    /// rejected like any other empty stage list.
    pub fn from_recipe(recipe: &Recipe) -> Result<Self, BuildError> {
        Self::from_configs(&recipe.build_configs()?)
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stages.iter().map(|s| s.name())
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run the whole chain over `text`.
    pub fn transliterate_str(&self, text: &str) -> String {
        let _span = debug_span!("transliterate", len = text.len(), stages = self.stages.len())
            .entered();
        let mut arena = CharArena::with_capacity(text.len() * (self.stages.len() + 1));
        let ids = arena.build_char_array(text);
        let mut stream = self.transliterate(Box::new(ArrayStream::new(ids)));
        let out = render(&mut arena, stream.as_mut());
        debug!(chars = arena.len(), out_len = out.len(), "done");
        out
    }
}

/// Build a chain from stage descriptions.
pub fn build_chain(configs: &[StageConfig]) -> Result<Chain, BuildError> {
    Chain::from_configs(configs)
}

impl Transliterator for Chain {
    fn transliterate<'a>(&'a self, input: BoxStream<'a>) -> BoxStream<'a> {
        self.stages
            .iter()
            .fold(input, |stream, stage| stage.transliterate(stream))
    }

    fn name(&self) -> &'static str {
        "chain"
    }
}
