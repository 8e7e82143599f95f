#![deny(missing_docs)]

//! # telgen-core — Foundational Types for the Telemetry Definition Compiler
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `serde_json`
//! and `thiserror` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Single [`MetadataKind`] enum.** The primitive kinds a metadata field
//!    may declare form a closed set. Adding a kind means adding a variant,
//!    and the compiler then points at every `match` that must handle it.
//!
//! 2. **One casing rule.** [`naming::pascal_case`] is the only path from a
//!    schema name to a generated type name, so the union registry, the
//!    per-metric interfaces and the accessor table can never disagree on
//!    what a name turns into.
//!
//! 3. **[`TelgenError`] hierarchy.** Structured errors with `thiserror` — no
//!    `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod error;
pub mod kind;
pub mod naming;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{ResolutionError, TelgenError};
pub use kind::MetadataKind;
pub use naming::{is_identifier, pascal_case, quote_literal};
