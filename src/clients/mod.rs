//! Channel-backed clients for the in-memory store actors.

pub mod document_client;
pub mod identity_client;

pub use document_client::*;
pub use identity_client::*;
