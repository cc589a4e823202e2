//! Nessie client library for versioned data operations
//!
//! This library provides a typed Rust client for the Nessie REST API,
//! a git-like catalog for data lakes. It covers:
//! - Reference management (branches, tags, detached hashes)
//! - Commit log and entry listing with pagination
//! - Contents retrieval and modification on a branch
//! - Merge and transplant of commits between branches
//!
//! ## Authentication
//!
//! Requests are sent unauthenticated by default. A bearer token can be
//! supplied through the `NESSIE_AUTH_TOKEN` environment variable (CLI) or
//! programmatically when creating the client:
//!
//! ```no_run
//! use nessie_client::nessie::api::NessieClient;
//!
//! let client = NessieClient::new("http://localhost:19120/api/v1", None).unwrap();
//! ```
//!
//! ## Wire format
//!
//! Several Nessie entities are discriminated unions on the wire: JSON
//! objects carrying a `type` field that selects which variant shape the
//! remaining fields follow. The [`nessie::models`] module maps those onto
//! Rust enums with codec helpers that preserve the API's null pass-through
//! and unknown-discriminator error semantics.
//!
//! See the README.md file for more usage examples.

pub mod nessie;
