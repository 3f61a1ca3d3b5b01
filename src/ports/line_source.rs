//! Line source port trait.

use std::io;

/// A finite, forward-only supply of text lines.
///
/// Implementations hand out lines without their terminator. A source is
/// consumed by a single load and cannot be rewound.
pub trait LineSource {
    /// Human-readable description of where the lines come from, for errors.
    fn origin(&self) -> &str;

    /// The next line, `None` at end of input, or the read error that ended it.
    fn next_line(&mut self) -> Option<io::Result<String>>;
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    fn origin(&self) -> &str {
        (**self).origin()
    }

    fn next_line(&mut self) -> Option<io::Result<String>> {
        (**self).next_line()
    }
}
