//! # formbase-client
//!
//! REST collaborator for the formbase filter engine.
//!
//! This crate provides:
//! - [`RestBackend`], a reqwest implementation of [`formbase_core::FormDataSource`]
//! - Client configuration from TOML or environment variables
//! - Logging setup shared by the `formbase-filter` binary
//!
//! # Example
//!
//! ```rust,no_run
//! use formbase_client::RestBackend;
//! use formbase_core::{FilterSet, FormSnapshot};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = RestBackend::from_env().unwrap();
//!     let snapshot = FormSnapshot::load(&backend, 5).await.unwrap();
//!     let records = snapshot.filter_remote(&backend, &FilterSet::new()).await.unwrap();
//!     assert_eq!(records.len(), snapshot.records.len());
//! }
//! ```

pub mod config;
pub mod rest;
pub mod telemetry;

pub use config::{ClientConfig, ConfigError};
pub use rest::RestBackend;
