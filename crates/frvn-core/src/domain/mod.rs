//! Core domain layer for FRVN.
//!
//! This module contains pure business logic with ZERO external dependencies.
//! All I/O (template enumeration, filesystem writes, subprocess execution)
//! is handled via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror
//! - **Immutable entities**: All domain objects are Clone + PartialEq

pub mod entities;
pub mod error;

// Re-exports for convenience
pub use entities::{
    common::RelativePath,
    deploy::{DeployTarget, ENV_FILE_CANDIDATES, EnvMap, merge_first_wins, parse_env},
    template::{
        DEFAULT_ENV_TEMPLATE, ENV_FALLBACK_NAME, EntryPayload, RenderContext,
        SENSITIVE_FILE_NAME, TemplateEntry,
    },
};

pub use error::{DomainError, ErrorCategory};
