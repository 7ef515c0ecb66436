#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # User Purge
//!
//! > **Cascading user deletion behind a shared secret.**
//!
//! One HTTP endpoint, `/deleteUserCompletely`, removes everything a user left behind:
//! their identity record in the authentication store, their profile document at
//! `users/{uid}`, and every document in the auxiliary collections whose `userId` field
//! equals their uid.
//!
//! ## 🏗️ Design
//!
//! ### Stores are traits, actors back them
//! The orchestrator only knows [`IdentityStore`](framework::IdentityStore) and
//! [`DocumentStore`](framework::DocumentStore). The in-memory implementations are actors:
//! each owns its state, processes messages one at a time, and is reached through a
//! cloneable client. Tests wrap any store in a recording decorator to count calls or
//! inject failures.
//!
//! ### Strict ordering, no rollback
//! Deletion runs identity, then profile, then each auxiliary collection in a fixed order.
//! Each step finishes before the next starts. The first failure stops the run and
//! nothing already deleted is restored.
//!
//! ### Observability
//! We use `tracing` everywhere. Each request runs in a span carrying the uid, and every
//! stage transition is logged at `debug`. See [`runtime::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Edge ([`api`], [`auth`])
//! - **Role**: Parses the query string, checks the secret before anything else, and maps
//!   outcomes to `200`, `403` or `500`.
//! - **Key items**: [`router`](api::router), [`RequestAuthenticator`](auth::RequestAuthenticator).
//!
//! ### 2. The Sequence ([`orchestrator`])
//! - **Role**: Runs the deletion steps in order and reports which stage failed.
//! - **Key items**: [`DeletionOrchestrator`](orchestrator::DeletionOrchestrator),
//!   [`DeletionError`](orchestrator::DeletionError).
//!
//! ### 3. The Stores ([`framework`], [`clients`], [`identity_actor`], [`document_actor`])
//! - **Role**: Store traits, request messages, actor implementations and their clients.
//! - **Key items**: [`IdentityClient`](clients::IdentityClient),
//!   [`DocumentClient`](clients::DocumentClient), [`framework::mock`].
//!
//! ### 4. The Process ([`runtime`])
//! - **Role**: Environment configuration, seeding, tracing and actor lifecycle.
//! - **Key items**: [`AppConfig`](runtime::AppConfig), [`PurgeSystem`](runtime::PurgeSystem).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! DELETION_SECRET=change-me SEED_FILE=fixtures/demo.json RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod api;
pub mod auth;
pub mod clients;
pub mod document_actor;
pub mod framework;
pub mod identity_actor;
pub mod model;
pub mod orchestrator;
pub mod runtime;
