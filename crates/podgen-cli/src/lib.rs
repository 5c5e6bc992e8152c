//! Shared plumbing for the podgen binaries
//!
//! Settings loading, output rendering and tracing setup used by both
//! `podgen-create` and `podgen-generate`.

pub mod config;
mod error;
pub mod logging;
pub mod output;

pub use config::{Overrides, Settings};
pub use error::{Error, Result};
pub use logging::init_tracing;
pub use output::{OutputFormat, render};
