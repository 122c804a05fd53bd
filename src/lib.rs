//! BigBlueButton API client
//!
//! This library provides a Rust client for the BigBlueButton conferencing
//! server's HTTP/XML API: it signs each call with the shared secret, issues
//! the GET request and maps the XML reply to plain records.
//!
//! # Modules
//!
//! - `client`: BigBlueButtonClient with the meeting operations
//! - `auth`: Checksum computation and URL signing
//! - `config`: Server URL, secret and transport settings
//! - `models`: Request parameters and response records
//!
//! # Authentication
//!
//! Every call carries a `checksum` parameter: the hex digest of the call
//! name, the encoded query string and the shared secret. SHA-256 is used by
//! default; SHA-1, SHA-384 and SHA-512 are available for older or stricter
//! servers.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod ids;
pub mod models;
pub mod observer;
pub mod xml;

#[cfg(test)]
mod client_mock;

// Re-export the main API types for ease of use
pub use auth::{BbbAuth, ChecksumAlgorithm};
pub use client::BigBlueButtonClient;
pub use config::ClientConfig;
pub use error::{ApiError, ErrorKind, Result};
pub use ids::{IdGenerator, RandomIdGenerator};
pub use models::{Attendee, CreateMeetingParams, JoinParams, MeetingInfo, MeetingResult, Role};
pub use observer::{ApiObserver, TracingObserver};
