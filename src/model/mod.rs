//! Pure data structures shared by the stores, the orchestrator and the HTTP layer.

pub mod collection;
pub mod document;
pub mod user;

pub use collection::*;
pub use document::*;
pub use user::*;
