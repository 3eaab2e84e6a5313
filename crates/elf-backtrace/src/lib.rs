//! Resolve a firmware crash backtrace into source locations.
//!
//! Panic handlers on embedded targets print a list of return addresses such
//! as
//!
//! ```text
//! Backtrace: 0x400d1234:0x3ffb0000 0x400d5678:0x3ffb0020
//! ```
//!
//! This crate extracts those addresses, finds the ELF file left behind by the
//! build, and runs `addr2line` against it once per address.
//!
//! # Modules
//! - [`extract_addresses`] - parse and validate the backtrace.
//! - [`locate_artifact`] - find the single ELF file in a directory.
//! - [`Symbolizer`] and [`Addr2Line`] - run the external symbolizer.
//! - [`inspect`] - pick a default symbolizer for the ELF architecture.

use std::io::Write;

mod address;
mod config;
mod error;
pub mod inspect;
mod locate;
mod symbolize;

pub use crate::address::extract_addresses;
pub use crate::config::{Config, SearchMode, DEFAULT_SUFFIX};
pub use crate::error::Error;
pub use crate::locate::locate_artifact;
pub use crate::symbolize::{
    symbolize_all, write_banner, Addr2Line, Symbolizer, ADDR2LINE_FLAGS,
};

/// Locate the artifact described by `config` and symbolize its addresses.
///
/// Nothing is passed to `symbolizer` unless exactly one artifact is found.
pub fn run<S, W>(config: &Config, symbolizer: &mut S, out: &mut W) -> Result<(), Error>
where
    S: Symbolizer + ?Sized,
    W: Write,
{
    let artifact = locate_artifact(&config.search_dir, &config.artifact_suffix)?;
    symbolize_all(symbolizer, &artifact, &config.addresses, out)
}
