//! Core Nessie domain: wire models and the REST API client
//!
//! This module is split in two layers:
//! - [`models`] holds the data shapes exchanged with the Nessie server,
//!   including the discriminated unions ([`models::Reference`] and
//!   [`models::Contents`]) and their JSON codecs.
//! - [`api`] holds [`api::NessieClient`], the async HTTP client that speaks
//!   the Nessie REST API v1 in terms of those models.
//!
//! The models are plain immutable records; they carry no connection state
//! and can be used independently of the client, e.g. to decode payloads
//! captured elsewhere.

pub mod api;
pub mod models;

pub use api::{ApiError, NessieClient};
pub use models::{Branch, Contents, Hash, ModelError, Reference, ReferenceType, Tag};
