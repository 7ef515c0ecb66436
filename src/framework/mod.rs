//! Store abstraction shared by the in-memory actors and the orchestrator.
//!
//! # Main Components
//!
//! - [`IdentityStore`] / [`DocumentStore`] - Traits the deletion flow is written against
//! - [`IdentityRequest`] / [`DocumentRequest`] - Messages exchanged with the store actors
//! - [`StoreError`] - Common error type for every store operation
//!
//! # Testing
//!
//! See [`mock`] module for channel-level mock clients and recording decorators.

pub mod error;
pub mod message;
pub mod mock;
pub mod store;

pub use error::*;
pub use message::*;
pub use store::*;
