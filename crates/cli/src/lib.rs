//! s3shell CLI library
//!
//! The REPL, command registry and output layer. Exported so integration
//! tests can drive the dispatcher directly.

pub mod commands;
pub mod context;
pub mod dispatcher;
pub mod output;
pub mod repl;

#[cfg(test)]
mod testing;
