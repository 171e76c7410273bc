//! Command handlers.
//!
//! Each submodule owns exactly one subcommand: translate parsed arguments
//! into core service calls and display the results. No business logic here.

pub mod completions;
pub mod deploy;
pub mod doctor;
pub mod export;
pub mod init;
