//! Concrete adapter implementations for ports.

pub mod reader_line_source;
pub mod str_line_source;
