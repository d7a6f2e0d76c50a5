//! mathfn Core Types
//!
//! This crate provides the foundational types shared across the mathfn
//! pipeline:
//! - Error kinds and the `CompileError` value
//! - The number-format (locale) profile and angle-unit selector
//! - Built-in function and constant catalogs
//! - The `CompiledFn` alias for compiled output functions

pub mod builtins;
mod error;
mod format;

pub use error::*;
pub use format::*;

use std::sync::Arc;

/// A compiled single-variable numeric function.
///
/// Compiled functions are pure with respect to the closures they capture
/// and may be invoked concurrently and repeatedly.
pub type CompiledFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;
