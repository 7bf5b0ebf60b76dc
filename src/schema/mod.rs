//! Schema module - Configuration, item catalog and run records for strand evolution.

mod catalog;
mod config;
mod evolution;

pub use catalog::*;
pub use config::*;
pub use evolution::*;
