//! Command-line interface for Leadmark
//!
//! This crate provides the `leadmark` binary. The argument parsing and the
//! run itself live here so they can be tested without spawning a process.

pub mod cli;
pub mod run;
