//! Pattern compilation
//!
//! Turns a pattern string in the date/time mini-language into an immutable
//! `Pattern` of field and literal tokens. Compilation is tolerant: quote
//! escaping never fails, unknown letters fall through as literals, so any
//! input string compiles.

mod tokens;

use winnow::Parser;
use winnow::combinator::repeat;

use crate::error::{FormatError, Result};
use crate::types::{Pattern, PatternToken};

/// Compile a pattern string into its token sequence.
///
/// Adjacent literal fragments are coalesced so each literal token carries a
/// maximal run of text.
pub fn compile_pattern(text: &str) -> Result<Pattern> {
    let mut input = text;
    let raw: Vec<PatternToken> = repeat(0.., tokens::parse_token)
        .parse_next(&mut input)
        .map_err(|e| FormatError::InvalidPattern(format!("{e:?}")))?;
    if !input.is_empty() {
        return Err(FormatError::InvalidPattern(format!(
            "trailing pattern text: {input:?}"
        )));
    }
    Ok(Pattern::new(coalesce(raw)))
}

fn coalesce(raw: Vec<PatternToken>) -> Vec<PatternToken> {
    let mut out: Vec<PatternToken> = Vec::with_capacity(raw.len());
    for token in raw {
        match token {
            PatternToken::Literal(text) => {
                if text.is_empty() {
                    continue;
                }
                if let Some(PatternToken::Literal(prev)) = out.last_mut() {
                    prev.push_str(&text);
                } else {
                    out.push(PatternToken::Literal(text));
                }
            }
            field => out.push(field),
        }
    }
    out
}

impl Pattern {
    /// Compile a pattern string. See [`compile_pattern`].
    pub fn compile(text: &str) -> Result<Self> {
        compile_pattern(text)
    }
}
