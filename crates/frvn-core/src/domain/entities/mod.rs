//! Domain entities.

pub mod common;
pub mod deploy;
pub mod template;
