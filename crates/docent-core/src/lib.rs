pub mod config;
pub mod document;
pub mod error;
pub mod gate;
pub mod gateway;
pub mod secret;
pub mod session;

// Re-export common error type
pub use error::{DocentError, ErrorKind, Result};
