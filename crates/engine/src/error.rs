//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidAmount`] thrown when an amount cannot be parsed or is not usable.
//! - [`InvalidSplit`] thrown when a split mutation is not allowed in the current mode.
//! - [`KeyNotFound`] thrown when an item is not found.
//! - [`InvalidTransition`] thrown when a flow is driven out of order.
//! - [`CameraUnavailable`] thrown when the capture device cannot be opened.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidSplit`]: EngineError::InvalidSplit
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidTransition`]: EngineError::InvalidTransition
//!  [`CameraUnavailable`]: EngineError::CameraUnavailable
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid split: {0}")]
    InvalidSplit(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
    #[error("{0}")]
    CameraUnavailable(String),
}
