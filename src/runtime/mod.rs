//! Runtime orchestration and lifecycle management.
//!
//! This module contains the infrastructure for running the endpoint as a process:
//!
//! - **Store lifecycle**: Starting, seeding, and shutting down the store actors
//! - **Configuration**: Reading settings and the shared secret from the environment
//! - **Observability setup**: Initializing tracing and logging
//!
//! # Main Components
//!
//! - [`PurgeSystem`] - Owns the identity and document actors
//! - [`AppConfig`] - Settings read by [`AppConfig::from_env`]
//! - [`Fixture`] - Seed data for the in-memory stores
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod config;
pub mod env;
pub mod purge_system;
pub mod seed;
pub mod tracing;

pub use config::*;
pub use purge_system::*;
pub use seed::*;
pub use tracing::*;
