//! Report rendering in console, JSON, and markdown formats

pub mod formatter;

pub use formatter::{
    formatter_for, ConsoleFormatter, JsonFormatter, MarkdownFormatter, OutputFormatter,
};
