pub mod config;
pub mod engines;
pub mod error;
pub mod report;
pub mod types;

pub use error::{CosmoselectError, Result};
