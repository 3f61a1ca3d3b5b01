//! confdata: sectioned configuration data file reader.
//!
//! Hexagonal architecture: parsing and the query store in [`domain`], port
//! traits in [`ports`], concrete line sources in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
pub mod logger;

pub use domain::error::{ConfigFileError, ErrorKind};
pub use domain::section::{Section, VariableEntry};
pub use domain::store::{ConfigStore, VarRef};
