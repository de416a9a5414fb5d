use winnow::combinator::alt;
use winnow::error::{ContextError, ErrMode};
use winnow::token::{any, literal, one_of, take_while};
use winnow::{ModalResult, Parser};

use crate::types::{FieldKind, PatternToken};

/// A doubled quote outside a quoted section: one literal quote character.
pub fn parse_doubled_quote(input: &mut &str) -> ModalResult<PatternToken> {
    literal("''")
        .map(|_| PatternToken::Literal("'".to_string()))
        .parse_next(input)
        .map_err(ErrMode::Backtrack)
}

/// A quoted literal section.
///
/// Inside the section a doubled quote stands for one quote character. An
/// unterminated section runs to the end of the pattern and contributes its
/// content as literal text; a quote with nothing after it contributes a
/// single literal quote.
pub fn parse_quoted_section(input: &mut &str) -> ModalResult<PatternToken> {
    '\''.parse_next(input).map_err(ErrMode::Backtrack)?;
    let mut text = String::new();
    loop {
        match input.chars().next() {
            None => {
                if text.is_empty() {
                    text.push('\'');
                }
                break;
            }
            Some('\'') => {
                *input = &input[1..];
                if let Some(rest) = input.strip_prefix('\'') {
                    *input = rest;
                    text.push('\'');
                } else {
                    break;
                }
            }
            Some(c) => {
                text.push(c);
                *input = &input[c.len_utf8()..];
            }
        }
    }
    Ok(PatternToken::Literal(text))
}

/// A run of one repeated field letter, e.g. `yyyy` or `MM`.
pub fn parse_field_run(input: &mut &str) -> ModalResult<PatternToken> {
    let letter = one_of(|c: char| FieldKind::from_letter(c).is_some())
        .parse_next(input)
        .map_err(ErrMode::Backtrack)?;
    let rest: &str = take_while(0.., |c: char| c == letter).parse_next(input)?;
    let kind = FieldKind::from_letter(letter)
        .ok_or_else(|| ErrMode::Backtrack(ContextError::new()))?;
    Ok(PatternToken::Field {
        kind,
        letter,
        repeat: rest.len() + 1,
    })
}

/// Any other character passes through as literal text, including ASCII
/// letters with no field meaning.
pub fn parse_literal_char(input: &mut &str) -> ModalResult<PatternToken> {
    any.map(|c: char| PatternToken::Literal(c.to_string()))
        .parse_next(input)
        .map_err(ErrMode::Backtrack)
}

pub fn parse_token(input: &mut &str) -> ModalResult<PatternToken> {
    alt((
        parse_doubled_quote,
        parse_quoted_section,
        parse_field_run,
        parse_literal_char,
    ))
    .parse_next(input)
}
