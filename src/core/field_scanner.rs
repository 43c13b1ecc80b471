// Copyright @yucwang 2026

//! Cursor over a single directive line that pulls out `key[value]` fields.
//!
//! The cursor never moves past the end of the line: a field whose closing
//! bracket is missing or whose contents do not parse is reported as a
//! [`ScanError`] instead.

use std::fmt;

use crate::math::constants::{Float, Vector3f};

#[derive(Debug, Clone, PartialEq)]
pub enum ScanError {
    MissingOpenBracket { keyword: &'static str, offset: usize },
    UnterminatedField { keyword: &'static str, offset: usize },
    InvalidNumber { keyword: &'static str, token: String },
    WrongComponentCount { keyword: &'static str, expected: usize, found: usize },
    EmptyValue { keyword: &'static str },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::MissingOpenBracket { keyword, offset } =>
                write!(f, "expected '[' after '{}' at column {}", keyword, offset + 1),
            ScanError::UnterminatedField { keyword, offset } =>
                write!(f, "field '{}' opened at column {} has no closing ']'", keyword, offset + 1),
            ScanError::InvalidNumber { keyword, token } =>
                write!(f, "invalid number '{}' in field '{}'", token, keyword),
            ScanError::WrongComponentCount { keyword, expected, found } =>
                write!(f, "field '{}' expects {} value(s), found {}", keyword, expected, found),
            ScanError::EmptyValue { keyword } =>
                write!(f, "field '{}' is empty", keyword),
        }
    }
}

impl std::error::Error for ScanError {}

pub struct FieldScanner<'a> {
    line: &'a str,
    cursor: usize,
}

impl<'a> FieldScanner<'a> {
    /// Starts scanning `line` at byte offset `start`, clamped to the line.
    pub fn new(line: &'a str, start: usize) -> Self {
        let mut start = start.min(line.len());
        while !line.is_char_boundary(start) {
            start += 1;
        }
        Self { line, cursor: start }
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn is_done(&self) -> bool {
        self.cursor >= self.line.len()
    }

    fn rest(&self) -> &'a str {
        &self.line[self.cursor..]
    }

    fn skip_char(&mut self) {
        if let Some(c) = self.rest().chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Advances to the next sub-field named in `table`.
    ///
    /// At every position the keywords are tried in table order and the first
    /// one directly followed by `[` wins. The cursor is left on the `[`.
    /// Text that starts no known field is skipped one character at a time.
    pub fn next_field<T: Copy>(&mut self, table: &[(&'static str, T)]) -> Option<(&'static str, T)> {
        while !self.is_done() {
            let rest = self.rest();
            for &(keyword, tag) in table {
                if rest.starts_with(keyword) && rest[keyword.len()..].starts_with('[') {
                    self.cursor += keyword.len();
                    return Some((keyword, tag));
                }
            }
            self.skip_char();
        }
        None
    }

    /// Returns the raw text between `[` and `]` and moves past the `]`.
    fn bracketed(&mut self, keyword: &'static str) -> Result<&'a str, ScanError> {
        let open = self.cursor;
        if !self.rest().starts_with('[') {
            return Err(ScanError::MissingOpenBracket { keyword, offset: open });
        }

        let body_start = open + 1;
        match self.line[body_start..].find(']') {
            Some(len) => {
                self.cursor = body_start + len + 1;
                Ok(&self.line[body_start..body_start + len])
            }
            None => {
                self.cursor = self.line.len();
                Err(ScanError::UnterminatedField { keyword, offset: open })
            }
        }
    }

    pub fn floats<const N: usize>(&mut self, keyword: &'static str) -> Result<[Float; N], ScanError> {
        let body = self.bracketed(keyword)?;
        let tokens: Vec<&str> = body.split_whitespace().collect();
        if tokens.len() != N {
            return Err(ScanError::WrongComponentCount { keyword, expected: N, found: tokens.len() });
        }

        let mut out = [0.0; N];
        for (slot, token) in out.iter_mut().zip(tokens) {
            *slot = parse_float(keyword, token)?;
        }
        Ok(out)
    }

    pub fn vector3(&mut self, keyword: &'static str) -> Result<Vector3f, ScanError> {
        let [x, y, z] = self.floats::<3>(keyword)?;
        Ok(Vector3f::new(x, y, z))
    }

    pub fn scalar(&mut self, keyword: &'static str) -> Result<Float, ScanError> {
        let [v] = self.floats::<1>(keyword)?;
        Ok(v)
    }

    /// Non-negative integer. Integral floats such as `640.0` are accepted.
    pub fn unsigned(&mut self, keyword: &'static str) -> Result<u32, ScanError> {
        let body = self.bracketed(keyword)?;
        let tokens: Vec<&str> = body.split_whitespace().collect();
        if tokens.len() != 1 {
            return Err(ScanError::WrongComponentCount { keyword, expected: 1, found: tokens.len() });
        }
        let token = tokens[0];
        if let Ok(v) = token.parse::<u32>() {
            return Ok(v);
        }
        match token.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => Ok(v as u32),
            _ => Err(ScanError::InvalidNumber { keyword, token: token.to_string() }),
        }
    }

    /// Copies the bracket contents verbatim. No escapes are recognised.
    pub fn string(&mut self, keyword: &'static str) -> Result<String, ScanError> {
        let body = self.bracketed(keyword)?;
        if body.trim().is_empty() {
            return Err(ScanError::EmptyValue { keyword });
        }
        Ok(body.to_string())
    }
}

fn parse_float(keyword: &'static str, token: &str) -> Result<Float, ScanError> {
    match token.parse::<Float>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ScanError::InvalidNumber { keyword, token: token.to_string() }),
    }
}
