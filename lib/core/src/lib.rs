//! Core types shared by every Peakwave dashboard crate.
//!
//! This crate provides the strongly-typed record identifiers handed out by the
//! members API, tolerant timestamp parsing and the rootcause-based `Result`
//! alias.

pub mod error;
pub mod id;
pub mod timestamp;

pub use error::Result;
pub use id::{IntegrationId, LogEntryId, ParseIdError, UserId};
