//! Strand text format and its run-length compression.
//!
//! An uncompressed strand is `GENE_COUNT` blocks of six letters over
//! `G T A C`. The compressed form replaces runs of three or more identical
//! letters with `<count><letter>`, e.g. `AAAACCCCTT` becomes `4A4CTT`.

use super::gene::{decode_block, ALPHABET, BLOCK_LEN};
use super::schema::GENE_COUNT;
use crate::error::{FractalTreeError, Result};

/// Length of a full strand for the pinned schema
pub const STRAND_LEN: usize = GENE_COUNT * BLOCK_LEN;

/// Runs shorter than this are left as literal letters
const MIN_RUN: usize = 3;

/// Compress runs of three or more identical letters. Digits are copied as-is.
pub fn compress(strand: &str) -> String {
    let mut out = String::with_capacity(strand.len());
    let mut chars = strand.chars().peekable();

    while let Some(letter) = chars.next() {
        let mut run = 1;
        if !letter.is_ascii_digit() {
            while chars.peek() == Some(&letter) {
                chars.next();
                run += 1;
            }
        }

        if run >= MIN_RUN {
            out.push_str(&run.to_string());
            out.push(letter);
        } else {
            out.extend(std::iter::repeat(letter).take(run));
        }
    }

    out
}

/// Expand every `<digits><letter>` token. Anything else passes through.
///
/// Fails on a zero count or a count that overflows `usize`.
pub fn uncompress(strand: &str) -> Result<String> {
    expand(strand, None)
}

/// Shared expansion loop. With a `limit`, stops as soon as the output would
/// grow past it, literal letters included.
fn expand(strand: &str, limit: Option<usize>) -> Result<String> {
    let mut out = String::with_capacity(strand.len());
    let mut digits = String::new();

    for c in strand.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }

        let (repeat, literal) = if !digits.is_empty() && c.is_ascii_uppercase() {
            let count: usize = digits.parse().map_err(|_| {
                FractalTreeError::MalformedStrand(format!("run length '{digits}' is too large"))
            })?;
            if count == 0 {
                return Err(FractalTreeError::MalformedStrand(format!(
                    "zero run length before '{c}'"
                )));
            }
            (count, "")
        } else {
            (1, digits.as_str())
        };

        if let Some(limit) = limit {
            if out.len().saturating_add(literal.len()).saturating_add(repeat) > limit {
                return Err(FractalTreeError::MalformedStrand(format!(
                    "expands past {limit} letters"
                )));
            }
        }
        out.push_str(literal);
        out.extend(std::iter::repeat(c).take(repeat));
        digits.clear();
    }

    if let Some(limit) = limit {
        if out.len() + digits.len() > limit {
            return Err(FractalTreeError::MalformedStrand(format!(
                "expands past {limit} letters"
            )));
        }
    }
    out.push_str(&digits);

    Ok(out)
}

/// A strand counts as compressed when it carries any decimal digit
pub fn is_compressed(strand: &str) -> bool {
    strand.chars().any(|c| c.is_ascii_digit())
}

/// Parse a strand (compressed or not) into one value per gene, in schema order.
///
/// Nothing is applied here; callers get either every value or an error.
pub fn parse_strand(strand: &str) -> Result<[i32; GENE_COUNT]> {
    let strand = strand.trim();
    let expanded = if is_compressed(strand) {
        expand(strand, Some(STRAND_LEN))?
    } else {
        strand.to_string()
    };

    if let Some((position, bad)) = expanded
        .chars()
        .enumerate()
        .find(|(_, c)| !ALPHABET.contains(c))
    {
        return Err(FractalTreeError::MalformedStrand(format!(
            "unexpected character '{bad}' at position {position}"
        )));
    }

    if expanded.len() != STRAND_LEN {
        return Err(FractalTreeError::MalformedStrand(format!(
            "expected {STRAND_LEN} letters ({GENE_COUNT} genes), got {}",
            expanded.len()
        )));
    }

    let mut values = [0; GENE_COUNT];
    for (slot, block) in values.iter_mut().zip(expanded.as_bytes().chunks(BLOCK_LEN)) {
        // alphabet checked above, so the block is ASCII
        let block = std::str::from_utf8(block)
            .map_err(|e| FractalTreeError::MalformedStrand(e.to_string()))?;
        *slot = decode_block(block).ok_or_else(|| {
            FractalTreeError::MalformedStrand(format!("bad block '{block}'"))
        })?;
    }

    Ok(values)
}
