//! Reading the initial field from its text description.
//!
//! ```text
//! 3 5
//! CCDCC
//! CDDDC
//! CCDCC
//! ```
//!
//! The first line holds the row and column counts, followed by exactly that
//! many rows of `C`/`D` characters.

use crate::grid::{Field, FieldError};
use crate::strategy::Strategy;
use std::path::Path;

/// Errors that can occur while loading a field
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("couldn't read the field file: {0}")]
    Io(#[from] std::io::Error),

    #[error("field file is empty, expected a \"<rows> <cols>\" header")]
    MissingHeader,

    #[error("malformed header {0:?}, expected \"<rows> <cols>\"")]
    MalformedHeader(String),

    #[error("unable to convert {0:?} to a positive integer")]
    InvalidDimension(String),

    #[error("expected {expected} rows, found {found}")]
    MissingRows { expected: usize, found: usize },

    #[error("line {line}: expected {expected} cells, found {found}")]
    RowLength {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}, column {column}: invalid cell {found:?}, expected 'C' or 'D'")]
    InvalidCell {
        line: usize,
        column: usize,
        found: char,
    },

    #[error("line {line}: unexpected content after the last row")]
    TrailingContent { line: usize },

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Load a field from a file
pub fn load_field<P: AsRef<Path>>(path: P) -> Result<Field, LoadError> {
    let contents = std::fs::read_to_string(path)?;
    parse_field(&contents)
}

/// Parse a field from its text description. Every cell starts with score 0.
pub fn parse_field(input: &str) -> Result<Field, LoadError> {
    let mut lines = input.lines().map(|l| l.strip_suffix('\r').unwrap_or(l));

    let header = lines.next().ok_or(LoadError::MissingHeader)?;
    let (rows, cols) = parse_header(header)?;

    let mut strategies = Vec::with_capacity(rows);
    for i in 0..rows {
        // 1-based line number, header is line 1
        let line = i + 2;
        let text = lines.next().ok_or(LoadError::MissingRows {
            expected: rows,
            found: i,
        })?;
        strategies.push(parse_row(text, line, cols)?);
    }

    for (i, rest) in lines.enumerate() {
        if !rest.trim().is_empty() {
            return Err(LoadError::TrailingContent { line: rows + 2 + i });
        }
    }

    Ok(Field::from_rows(strategies)?)
}

fn parse_header(header: &str) -> Result<(usize, usize), LoadError> {
    let items: Vec<&str> = header.split(' ').collect();
    if items.len() != 2 {
        return Err(LoadError::MalformedHeader(header.to_string()));
    }
    Ok((parse_dimension(items[0])?, parse_dimension(items[1])?))
}

fn parse_dimension(item: &str) -> Result<usize, LoadError> {
    match item.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(LoadError::InvalidDimension(item.to_string())),
    }
}

fn parse_row(text: &str, line: usize, cols: usize) -> Result<Vec<Strategy>, LoadError> {
    let found = text.chars().count();
    if found != cols {
        return Err(LoadError::RowLength {
            line,
            expected: cols,
            found,
        });
    }

    text.chars()
        .enumerate()
        .map(|(i, c)| {
            Strategy::from_char(c).ok_or(LoadError::InvalidCell {
                line,
                column: i + 1,
                found: c,
            })
        })
        .collect()
}
