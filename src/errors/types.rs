//! Error type definitions for the PictoAmigos core
//!
//! The hierarchy mirrors the layers of the crate: `LookupError` for the
//! remote pictogram API, `SelectionError` for the selection session and
//! `AppError` at the top.

use thiserror::Error;

use crate::models::PictogramId;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Remote lookup errors
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Selection session errors
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// Chat store errors
    #[error("Chat store error: {message}")]
    ChatStore { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Failures talking to the remote pictogram API
///
/// The lookup client catches all of these at its boundary and degrades to an
/// empty result or a fallback search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The API answered with a non-2xx status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Connection, TLS or body transfer failure
    #[error("Transport failure for {url}: {message}")]
    Transport { url: String, message: String },

    /// The body could not be decoded as the expected JSON
    #[error("Malformed response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Warnings raised by the selection session
///
/// None of these change session state; the UI shows them as dismissible
/// notifications.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The selection already holds the maximum number of pictograms
    #[error("At most {capacity} pictograms can be sent per message")]
    CapacityExceeded { capacity: usize },

    /// Send was attempted with nothing selected
    #[error("Select at least one pictogram")]
    EmptySelection,

    /// The pictogram is not part of the current search results
    #[error("Pictogram {id} is not in the current results")]
    NotInResults { id: PictogramId },
}

impl AppError {
    /// Create a chat store error
    pub fn chat_store<S: Into<String>>(message: S) -> Self {
        Self::ChatStore {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl LookupError {
    /// Create a status error
    pub fn status<U: Into<String>>(status: u16, url: U) -> Self {
        Self::Status {
            status,
            url: url.into(),
        }
    }

    /// Create a transport error
    pub fn transport<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.into(),
        }
    }
}
