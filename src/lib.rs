//! OccuFit: resume-to-occupation fit analysis library

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod judge;
pub mod model;
pub mod output;
pub mod store;

pub use config::Config;
pub use error::{OccufitError, Result};
