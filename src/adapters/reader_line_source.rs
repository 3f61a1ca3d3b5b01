//! Buffered reader line source, including files on disk.

use crate::ports::line_source::LineSource;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

const UTF8_BOM: char = '\u{feff}';

pub struct ReaderLineSource<R> {
    origin: String,
    lines: io::Lines<R>,
    first: bool,
}

impl<R: BufRead> ReaderLineSource<R> {
    pub fn new(origin: impl Into<String>, reader: R) -> Self {
        Self {
            origin: origin.into(),
            lines: reader.lines(),
            first: true,
        }
    }
}

impl ReaderLineSource<BufReader<File>> {
    /// Open `path` for reading. The file handle is released when the source
    /// is dropped.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Ok(Self::new(path.display().to_string(), BufReader::new(file)))
    }
}

impl<R: Read> ReaderLineSource<BufReader<R>> {
    pub fn from_reader(origin: impl Into<String>, reader: R) -> Self {
        Self::new(origin, BufReader::new(reader))
    }
}

impl<R: BufRead> LineSource for ReaderLineSource<R> {
    fn origin(&self) -> &str {
        &self.origin
    }

    fn next_line(&mut self) -> Option<io::Result<String>> {
        let line = self.lines.next()?;
        if !std::mem::replace(&mut self.first, false) {
            return Some(line);
        }
        Some(line.map(|l| match l.strip_prefix(UTF8_BOM) {
            Some(rest) => rest.to_string(),
            None => l,
        }))
    }
}
