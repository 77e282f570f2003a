mod client;
mod types;

pub use client::{ClusterReader, DEFAULT_LOG_TAIL_LINES, KubeClusterReader, LOG_LIMIT_BYTES};
pub use types::*;
