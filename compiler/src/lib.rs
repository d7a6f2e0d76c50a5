//! mathfn Compiler
//!
//! Compile textual single-variable math expressions into callable numeric
//! functions.
//!
//! Responsibilities:
//! - Extract and validate function names from `"name=expression"` sources
//! - Order definitions by their call dependencies
//! - Compile syntax trees into nested `f(x) -> f64` closures
//! - Resolve built-in functions, constants, and custom functions
//!
//! ```
//! let f = mathfn_compiler::compile_function("2x + sin(x)").unwrap();
//! assert_eq!(f(0.0), 0.0);
//! ```

mod compile;
mod compiler;
mod result;
mod symbols;

pub use compiler::{compile, compile_function, Compiler};
pub use result::CompileResult;

pub use mathfn_core::{AngleUnit, CompileError, CompiledFn, ErrorKind, NumberFormat};
