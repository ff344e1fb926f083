//! Test utilities for jobhist
//!
//! Builders for metadata and configuration documents, plus helpers that lay
//! them out as a history root on disk or in a [`MemoryFs`](crate::storage::MemoryFs).
//!
//! # Example
//!
//! ```rust,no_run
//! use jobhist_cli::test_utils::{ConfigFixture, MetadataFixture};
//!
//! let metadata = MetadataFixture::new("application_1_0001").status("FAILED");
//! let config = ConfigFixture::new().property("mapreduce.job.queuename", "default", true, "job.xml");
//! assert!(metadata.to_json().contains("FAILED"));
//! assert!(config.to_xml().contains("<final>true</final>"));
//! ```

pub mod fixtures;

pub use fixtures::{ConfigFixture, HistoryFixture, MetadataFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`. With neither, tests run
/// without a subscriber.
///
/// ```bash
/// RUST_LOG=jobhist_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
