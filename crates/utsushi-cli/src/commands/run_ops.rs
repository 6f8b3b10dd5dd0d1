use std::io::{self, BufRead, BufWriter, Write};

use tracing::debug;
use utsushi_core::Chain;

use super::load_chain;

pub fn run(recipe: Option<&str>, stages: Option<&str>, texts: &[String]) {
    let chain = die!(load_chain(recipe, stages), "Error: {}");
    debug!(stages = chain.len(), "chain ready");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let written = if texts.is_empty() {
        transliterate_lines(&chain, io::stdin().lock(), &mut out)
    } else {
        texts
            .iter()
            .try_for_each(|text| writeln!(out, "{}", chain.transliterate_str(text)))
    };
    die!(written.and_then(|()| out.flush()), "Error writing output: {}");
}

/// Transliterate `input` one line at a time. Line terminators are not
/// passed through the chain.
pub fn transliterate_lines<R: BufRead, W: Write>(
    chain: &Chain,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    for line in input.lines() {
        writeln!(out, "{}", chain.transliterate_str(&line?))?;
    }
    Ok(())
}
