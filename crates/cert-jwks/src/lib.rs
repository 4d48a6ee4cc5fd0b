//! Command-line front end for publishing certificates as JWK Sets.
//!
//! # Modules
//!
//! - `cli` - Argument parsing and the per-input build loop
//! - `config` - Environment defaults for build options and logging

pub mod cli;
pub mod config;
