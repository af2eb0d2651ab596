#![doc = "jr-tools-core: client library for a JasperReports Server REST v2 API."]

//! Run reports and bulk-load repository resources (files, report units, data
//! types, input controls) against a report server.
//!
//! All I/O is synchronous, blocking and unretried: one request at a time,
//! fatal on network failure. The user-facing CLI lives in the `jr-tools`
//! crate.
//!
//! # Usage
//! Construct a [`Connection`] (validated up front), a [`Client`] over it, and
//! either call the client directly or drive it from a manifest via
//! [`loader::load`]. Tests inject [`contract::MockTransport`] to observe the
//! request sequence.

pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod http;
pub mod loader;
pub mod manifest;

pub use client::{Client, OutputFormat, ALLOWED_REPORT_FORMATS};
pub use config::Connection;
pub use error::Error;
