//! Centralized error handling for the PictoAmigos core
//!
//! This module unifies the error types used across the lookup client, the
//! selection session and the chat store.
//!
//! # Error Categories
//!
//! - **Lookup Errors**: remote pictogram API failures (non-2xx, transport,
//!   malformed bodies). These never leave the lookup client.
//! - **Selection Errors**: transient warnings raised by the selection session
//!   (capacity reached, nothing selected, unknown pictogram)
//! - **Application Errors**: configuration and collaborator failures
//!
//! # Usage
//!
//! ```rust
//! use picto_amigos::errors::{AppError, AppResult};
//!
//! async fn example_function() -> AppResult<String> {
//!     // Function can return any error type that converts to AppError
//!     Ok("success".to_string())
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for remote lookup Results
pub type LookupResult<T> = Result<T, LookupError>;

/// Convenience type alias for selection session Results
pub type SelectionResult<T> = Result<T, SelectionError>;
