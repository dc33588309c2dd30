//! Server module exposing the venue operations over HTTP
//!
//! The `ServerBuilder` wires a venue store into the venue and health routes
//! and serves them with graceful shutdown.

pub mod builder;
pub mod extract;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
