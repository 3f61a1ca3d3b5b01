//! Tokenizer for a single configuration line.
//!
//! A backslash makes the following `#`, `;`, `=`, `:`, `,` or `\` literal.
//! Before any other character, or at end of line, the backslash is kept as-is.

use crate::domain::error::ConfigFileError;
use crate::domain::name;
use crate::domain::section::VariableEntry;

/// Longest accepted line, in characters, once comments are stripped.
pub const MAX_LINE_LENGTH: usize = 255;

/// What a source line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Empty or comment-only.
    Blank,
    /// `[NAME]`, already normalized.
    Section(String),
    /// `NAME[, comment] = value[, comment]`, name already normalized.
    Variable { name: String, entry: VariableEntry },
}

#[derive(Debug, Clone, Copy)]
struct Glyph {
    c: char,
    escaped: bool,
}

impl Glyph {
    fn is(self, c: char) -> bool {
        !self.escaped && self.c == c
    }

    /// Characters this glyph took up in the source text.
    fn source_width(self) -> usize {
        if self.escaped { 2 } else { 1 }
    }
}

fn is_escapable(c: char) -> bool {
    matches!(c, '#' | ';' | '=' | ':' | ',' | '\\')
}

fn scan(raw: &str) -> Vec<Glyph> {
    let mut glyphs = Vec::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('\\', Some(&next)) if is_escapable(next) => {
                chars.next();
                glyphs.push(Glyph { c: next, escaped: true });
            }
            _ => glyphs.push(Glyph { c, escaped: false }),
        }
    }

    glyphs
}

fn strip_comment(glyphs: &[Glyph]) -> &[Glyph] {
    match glyphs.iter().position(|g| g.is('#') || g.is(';')) {
        Some(i) => &glyphs[..i],
        None => glyphs,
    }
}

fn trim(glyphs: &[Glyph]) -> &[Glyph] {
    let start = glyphs
        .iter()
        .position(|g| !g.c.is_whitespace())
        .unwrap_or(glyphs.len());
    let end = glyphs
        .iter()
        .rposition(|g| !g.c.is_whitespace())
        .map_or(start, |i| i + 1);
    &glyphs[start..end]
}

fn split_first(glyphs: &[Glyph], pred: impl Fn(Glyph) -> bool) -> Option<(&[Glyph], &[Glyph])> {
    glyphs
        .iter()
        .position(|&g| pred(g))
        .map(|i| (&glyphs[..i], &glyphs[i + 1..]))
}

/// Split `glyphs` on the first unescaped comma into trimmed text and comment.
fn text_and_comment(glyphs: &[Glyph]) -> (String, String) {
    match split_first(glyphs, |g| g.is(',')) {
        Some((text, comment)) => (to_text(trim(text)), to_text(trim(comment))),
        None => (to_text(trim(glyphs)), String::new()),
    }
}

fn to_text(glyphs: &[Glyph]) -> String {
    glyphs.iter().map(|g| g.c).collect()
}

/// Classify and validate one raw source line. `line_no` is 1-based and only
/// used for error reporting.
pub fn parse_line(raw: &str, line_no: usize) -> Result<Line, ConfigFileError> {
    let head = raw.trim_start();
    if head.is_empty() || head.starts_with('#') || head.starts_with(';') {
        return Ok(Line::Blank);
    }

    let glyphs = scan(raw);
    let content = strip_comment(&glyphs);

    let width: usize = content.iter().map(|&g| g.source_width()).sum();
    if width > MAX_LINE_LENGTH {
        return Err(ConfigFileError::MalformedLine {
            line: line_no,
            reason: format!("line exceeds {MAX_LINE_LENGTH} characters"),
        });
    }

    let content = trim(content);
    if content.is_empty() {
        return Ok(Line::Blank);
    }

    if let [open, interior @ .., close] = content {
        if open.is('[') && close.is(']') {
            let raw_name = to_text(trim(interior));
            return name::normalize_valid(&raw_name)
                .map(Line::Section)
                .ok_or(ConfigFileError::InvalidSectionName {
                    line: line_no,
                    name: raw_name,
                });
        }
    }

    let (left, right) = split_first(content, |g| g.is('=') || g.is(':')).ok_or_else(|| {
        ConfigFileError::MalformedLine {
            line: line_no,
            reason: format!("missing '=' or ':' separator in '{}'", to_text(content)),
        }
    })?;

    let (raw_name, variable_comment) = text_and_comment(left);
    let name = name::normalize_valid(&raw_name).ok_or(ConfigFileError::InvalidVariableName {
        line: line_no,
        name: raw_name,
    })?;
    let (value, value_comment) = text_and_comment(right);

    Ok(Line::Variable {
        name,
        entry: VariableEntry {
            variable_comment,
            value,
            value_comment,
        },
    })
}
