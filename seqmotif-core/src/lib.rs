//! Shared primitives for the seqmotif ecosystem.
//!
//! `seqmotif-core` provides the foundation the other seqmotif crates build
//! on:
//!
//! - **Error types** — [`SeqmotifError`] and [`Result`] for structured error
//!   handling across the workspace

pub mod error;

pub use error::{Result, SeqmotifError};
