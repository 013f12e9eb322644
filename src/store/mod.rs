//! File-backed fact suppliers and the analysis store

pub mod files;

pub use files::{DirectoryStore, FileCatalog};
