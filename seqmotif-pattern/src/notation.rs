//! Parsing of rendered motif notation back into structured form.
//!
//! Accepts the notation produced by the formatters in [`crate::aggregate`]:
//! `-`-separated tokens where each token is either a single anchor letter or
//! a gap token `x(2)`, `x(2,4)` (inclusive range) or `x(2|7|9)` (explicit
//! list). Two consecutive letters denote an adjacent anchor pair with no gap
//! token.

use seqmotif_core::{Result, SeqmotifError};

/// A parsed motif: anchor skeleton plus one gap slot per adjacent pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPattern {
    /// The anchor letters, e.g. `"BABA"`.
    pub skeleton: String,
    /// One entry per adjacent anchor pair: `None` when the notation carried
    /// no gap token, otherwise the distinct ascending spacer values (ranges
    /// expanded to their full run).
    pub gaps: Vec<Option<Vec<usize>>>,
}

fn parse_value(s: &str) -> Result<usize> {
    s.parse::<usize>()
        .map_err(|_| SeqmotifError::Parse(format!("invalid gap value {:?}", s)))
}

fn parse_gap_token(inner: &str) -> Result<Vec<usize>> {
    if let Some((lo, hi)) = inner.split_once(',') {
        let lo = parse_value(lo)?;
        let hi = parse_value(hi)?;
        if lo > hi {
            return Err(SeqmotifError::Parse(format!(
                "inverted gap range x({},{})",
                lo, hi
            )));
        }
        return Ok((lo..=hi).collect());
    }
    let mut values: Vec<usize> = inner
        .split('|')
        .map(parse_value)
        .collect::<Result<Vec<_>>>()?;
    values.sort_unstable();
    values.dedup();
    Ok(values)
}

/// Parse a rendered pattern such as `B-x(2|11)-A-x(2,4)-B` or `A-B`.
///
/// # Errors
///
/// Returns [`SeqmotifError::Parse`] on empty input, unknown tokens,
/// consecutive gap tokens, or a gap token without an anchor on both sides.
pub fn parse_notation(s: &str) -> Result<ParsedPattern> {
    let mut skeleton = String::new();
    let mut gaps: Vec<Option<Vec<usize>>> = Vec::new();
    // Gap values waiting for the anchor that closes their slot.
    let mut pending: Option<Vec<usize>> = None;

    for token in s.split('-') {
        let bytes = token.as_bytes();
        if bytes.len() == 1 && bytes[0].is_ascii_uppercase() {
            if !skeleton.is_empty() {
                gaps.push(pending.take());
            }
            skeleton.push(bytes[0] as char);
        } else if token.starts_with("x(") && token.ends_with(')') {
            if skeleton.is_empty() {
                return Err(SeqmotifError::Parse(format!(
                    "gap token before first anchor in {:?}",
                    s
                )));
            }
            if pending.is_some() {
                return Err(SeqmotifError::Parse(format!(
                    "consecutive gap tokens in {:?}",
                    s
                )));
            }
            pending = Some(parse_gap_token(&token[2..token.len() - 1])?);
        } else {
            return Err(SeqmotifError::Parse(format!(
                "unrecognized token {:?} in {:?}",
                token, s
            )));
        }
    }

    if pending.is_some() {
        return Err(SeqmotifError::Parse(format!(
            "gap token after last anchor in {:?}",
            s
        )));
    }
    if skeleton.is_empty() {
        return Err(SeqmotifError::Parse("empty pattern".into()));
    }
    Ok(ParsedPattern { skeleton, gaps })
}
