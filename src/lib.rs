//! Threaded and chronological views over multi-agent debate transcripts.

pub mod config;
pub mod debate;
pub mod error;
pub mod models;
pub mod summary;
pub mod thread;
pub mod tracing_init;

pub use error::{Result, ThreadError};
pub use models::{Message, ViewMode};
pub use thread::{organize, reply_preview};
