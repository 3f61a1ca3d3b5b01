//! Configuration data model, line parsing and the query store.

pub mod error;
pub mod name;
pub mod value;
pub mod section;
pub mod line;
pub mod store;
