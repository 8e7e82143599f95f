//! # telgen-cli — Telemetry Definition Compiler CLI
//!
//! ## Subcommands
//!
//! - `generate` — validate, merge and compile definitions into one
//!   TypeScript file
//! - `check` — everything `generate` does except writing the file
//!
//! ## Crate Policy
//!
//! - Argument structs live next to their handlers; `main.rs` only parses
//!   and dispatches.
//! - Handlers return `anyhow::Result<u8>` (the exit code). Library errors
//!   are wrapped with context naming the file or step that failed.

pub mod check;
pub mod generate;
pub mod input;
