use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Address of a node inside a [`LocaleTree`](crate::core::LocaleTree).
///
/// The canonical string form joins plain segments with `.` and renders any
/// segment that is not plain as `["segment"]`:
///
/// - `["nav", "home"]` -> `nav.home`
/// - `["errors", "404.title"]` -> `errors["404.title"]`
/// - `["a b", "c"]` -> `["a b"].c`
///
/// A segment is plain when it is non-empty and only contains ASCII
/// alphanumerics, `_`, `$` or `-`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath {
    segments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyPathError {
    #[error("key path is empty")]
    Empty,
    #[error("empty segment at byte {0}")]
    EmptySegment(usize),
    #[error("unterminated bracket segment starting at byte {0}")]
    Unterminated(usize),
    #[error("unexpected character '{ch}' at byte {offset}")]
    Unexpected { ch: char, offset: usize },
}

impl KeyPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn root() -> Self {
        Self::default()
    }

    /// Parse the canonical string form (also accepts `['segment']`).
    pub fn parse(input: &str) -> Result<Self, KeyPathError> {
        if input.is_empty() {
            return Err(KeyPathError::Empty);
        }

        let bytes = input.as_bytes();
        let mut segments = Vec::new();
        let mut pos = 0;
        // True right after a '.', where a plain segment must follow.
        let mut expect_plain = false;

        while pos < bytes.len() {
            match bytes[pos] {
                b'[' if !expect_plain => {
                    let (segment, next) = parse_bracket(input, pos)?;
                    segments.push(segment);
                    pos = next;
                    if pos < bytes.len() {
                        match bytes[pos] {
                            b'.' => {
                                pos += 1;
                                expect_plain = true;
                                if pos == bytes.len() {
                                    return Err(KeyPathError::EmptySegment(pos));
                                }
                            }
                            b'[' => {}
                            _ => {
                                return Err(unexpected(input, pos));
                            }
                        }
                    }
                }
                _ => {
                    let start = pos;
                    while pos < bytes.len() && bytes[pos] != b'.' && bytes[pos] != b'[' {
                        pos += 1;
                    }
                    if pos == start {
                        return Err(KeyPathError::EmptySegment(start));
                    }
                    segments.push(input[start..pos].to_string());
                    expect_plain = false;
                    if pos < bytes.len() && bytes[pos] == b'.' {
                        pos += 1;
                        expect_plain = true;
                        if pos == bytes.len() {
                            return Err(KeyPathError::EmptySegment(pos));
                        }
                    }
                }
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn first(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// A new path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// The path made of the first `len` segments.
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            segments: self.segments[..len.min(self.segments.len())].to_vec(),
        }
    }

    /// True when `self` equals `other` or lies underneath it.
    pub fn starts_with(&self, other: &KeyPath) -> bool {
        self.segments.starts_with(&other.segments)
    }
}

/// Parse `["..."]` or `['...']` starting at `start` (which points at `[`).
fn parse_bracket(input: &str, start: usize) -> Result<(String, usize), KeyPathError> {
    let mut chars = input[start + 1..].char_indices();
    let quote = match chars.next() {
        Some((_, q @ ('"' | '\''))) => q,
        Some((offset, ch)) => {
            return Err(KeyPathError::Unexpected {
                ch,
                offset: start + 1 + offset,
            });
        }
        None => return Err(KeyPathError::Unterminated(start)),
    };

    let mut segment = String::new();
    while let Some((offset, ch)) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some((_, escaped)) => segment.push(escaped),
                None => return Err(KeyPathError::Unterminated(start)),
            },
            c if c == quote => {
                let close = start + 1 + offset + c.len_utf8();
                if input[close..].starts_with(']') {
                    return Ok((segment, close + 1));
                }
                return Err(KeyPathError::Unterminated(start));
            }
            c => segment.push(c),
        }
    }

    Err(KeyPathError::Unterminated(start))
}

fn unexpected(input: &str, offset: usize) -> KeyPathError {
    let ch = input[offset..].chars().next().unwrap_or(' ');
    KeyPathError::Unexpected { ch, offset }
}

/// Whether a segment can be written without brackets.
pub fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '-')
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if is_plain_segment(segment) {
                if index > 0 {
                    f.write_str(".")?;
                }
                f.write_str(segment)?;
            } else {
                f.write_str("[\"")?;
                for c in segment.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"]")?;
            }
        }
        Ok(())
    }
}

impl From<&str> for KeyPath {
    /// Split on `.` only. Use [`KeyPath::parse`] for bracketed segments.
    fn from(value: &str) -> Self {
        KeyPath::new(value.split('.'))
    }
}

impl FromStr for KeyPath {
    type Err = KeyPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for KeyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
