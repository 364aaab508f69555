//! Infrastructure layer - host integrations and utilities.
//!
//! This module contains code that interfaces with the page host:
//! - The `Dom`/`Scheduler` seams
//! - In-memory implementations for native tests (`testing` feature)
//! - The `web-sys` browser adapter (wasm32 only)
//! - Console logging bootstrap
//! - Error types

pub mod dom;
pub mod error;
pub mod logging;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
#[cfg(any(test, feature = "testing"))]
pub mod selector;
#[cfg(target_arch = "wasm32")]
pub mod web;
