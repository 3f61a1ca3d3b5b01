//! Port traits between the domain and its collaborators.

pub mod line_source;
pub mod config_port;
