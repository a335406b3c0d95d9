//! Core definitions (errors, results and task spawning), relied upon by all osmtext-* crates.

pub mod async_runtime;
pub mod error;
pub mod macros;
pub mod result;

pub use result::Result;
