//! Centralized error types for the registry
//!
//! All registry errors are represented by the `RegistryError` enum.
//! Use `Result<T>` as shorthand for `std::result::Result<T, RegistryError>`.

use crate::category::Category;
use std::fmt;

/// All registry errors
#[derive(Debug)]
pub enum RegistryError {
    /// The sink factory could not construct a sink for a new emitter
    SinkAllocation {
        category: Category,
        source: std::io::Error,
    },
    /// `release` was called with a handle this registry does not track
    /// (already released, or created by a different registry)
    InvalidHandle {
        category: Category,
        name: Option<String>,
    },
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SinkAllocation { source, .. } => Some(source),
            Self::InvalidHandle { .. } => None,
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SinkAllocation { category, .. } => {
                write!(f, "Cannot create sink for category {}", category)
            }
            Self::InvalidHandle { category, name } => match name {
                Some(name) => write!(f, "Handle {} \"{}\" is not tracked here", category, name),
                None => write!(f, "Handle {} is not tracked here", category),
            },
        }
    }
}

/// Alias for Result with RegistryError
pub type Result<T> = std::result::Result<T, RegistryError>;
