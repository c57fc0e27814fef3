//! Shared pieces of the `mxmeta` command-line tool.

pub mod logging;
pub mod sink;

pub use sink::JsonSink;
