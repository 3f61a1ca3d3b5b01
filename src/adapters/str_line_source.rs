//! In-memory line source over borrowed text.

use crate::ports::line_source::LineSource;
use std::io;
use std::str::Lines;

pub struct StrLineSource<'a> {
    origin: String,
    lines: Lines<'a>,
}

impl<'a> StrLineSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::with_origin("<string>", text)
    }

    pub fn with_origin(origin: impl Into<String>, text: &'a str) -> Self {
        Self {
            origin: origin.into(),
            lines: text.strip_prefix('\u{feff}').unwrap_or(text).lines(),
        }
    }
}

impl LineSource for StrLineSource<'_> {
    fn origin(&self) -> &str {
        &self.origin
    }

    fn next_line(&mut self) -> Option<io::Result<String>> {
        self.lines.next().map(|line| Ok(line.to_string()))
    }
}
