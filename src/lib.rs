pub mod agent;
pub mod cluster;
pub mod config;
pub mod error;
pub mod llm;
pub mod server;

pub use error::{Error, Result};
