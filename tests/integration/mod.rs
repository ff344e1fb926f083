//! Integration test suite for jobhist
//!
//! End-to-end tests that run the `jobhist` binary against temporary history
//! roots.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **extract**: `metadata` and `config` on single documents
//! - **history**: `show` and `list` against a history root
//! - **settings**: settings file handling and global flags

#[path = "../common/mod.rs"]
mod common;

mod extract;
mod history;
mod settings;
