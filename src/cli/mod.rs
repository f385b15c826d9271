//! Command-line interface collaborators: argument parsing and the on-disk
//! registry configuration.

pub mod args;
pub mod config;

pub use args::Args;
pub use config::Conf;
