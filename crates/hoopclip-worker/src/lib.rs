//! Shot tracking worker.
//!
//! This crate provides:
//! - Environment-driven configuration
//! - A JSON Lines detections reader
//! - Detection on the blocking pool with progress logging
//! - Session reports and highlight rendering
//! - Structured logging and Prometheus metrics

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod processor;
pub mod source;

pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use logging::{init_tracing, SessionLogger};
pub use processor::{SessionReport, ShotProcessor};
pub use source::{CancellableSource, JsonlFrameSource};
