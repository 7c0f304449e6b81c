//! Error types for classforge.
//!
//! All errors are strongly typed using thiserror. This enables pattern
//! matching on specific error conditions and provides clear messages.

use thiserror::Error;

use crate::identity::ClassId;

/// Errors raised by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A record's parent was set to a second, different non-nil value.
    #[error("parent of '{identity}' is already '{existing}' and cannot be changed to '{proposed}'")]
    ConflictingParent {
        /// The record whose parent was being set.
        identity: ClassId,
        /// The parent already on record.
        existing: ClassId,
        /// The conflicting parent that was proposed.
        proposed: ClassId,
    },

    /// An identity with no record was resolved, constructed, or described.
    #[error("class '{identity}' is not registered with the factory")]
    Unregistered {
        /// The missing identity.
        identity: ClassId,
    },

    /// The parent chain loops back on itself.
    #[error("parent chain through '{identity}' forms a cycle")]
    ParentCycle {
        /// The identity at which the cycle was detected.
        identity: ClassId,
    },

    /// A registry lock was poisoned by a panicking writer.
    #[error("poisoned registry lock: {context}")]
    LockPoisoned {
        /// The operation that observed the poisoned lock.
        context: &'static str,
    },
}

/// Errors raised while constructing an instance from a resolved identity.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The catalog holds no constructor for the resolved identity.
    #[error("no constructor registered for class '{identity}'")]
    UnknownType {
        /// The identity the catalog was asked for.
        identity: ClassId,
    },

    /// A constructed instance could not be downcast to the requested type.
    #[error("instance of class '{identity}' is not of the requested type")]
    WrongType {
        /// The identity whose instance failed the downcast.
        identity: ClassId,
    },

    /// The underlying constructor failed; the message propagates unchanged.
    #[error("constructor for class '{identity}' failed: {message}")]
    Constructor {
        /// The identity whose constructor failed.
        identity: ClassId,
        /// The constructor's own failure message.
        message: String,
    },

    /// A catalog lock was poisoned by a panicking writer.
    #[error("poisoned catalog lock: {context}")]
    LockPoisoned {
        /// The operation that observed the poisoned lock.
        context: &'static str,
    },
}

impl BuildError {
    /// Creates a constructor failure for `identity`.
    #[must_use]
    pub fn constructor(identity: ClassId, message: impl Into<String>) -> Self {
        Self::Constructor {
            identity,
            message: message.into(),
        }
    }
}

/// Top-level error type for classforge.
///
/// This enum encompasses all possible errors that can occur when using
/// the registry and construction facade.
#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("build error: {0}")]
    Build(#[from] BuildError),

    #[error("internal error: {message}")]
    Internal {
        /// Description of the invariant violation.
        message: String,
    },
}

impl ForgeError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a registry error.
    #[must_use]
    pub const fn is_registry(&self) -> bool {
        matches!(self, Self::Registry(_))
    }

    /// Returns true if this is a build error.
    #[must_use]
    pub const fn is_build(&self) -> bool {
        matches!(self, Self::Build(_))
    }

    /// Returns true if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

/// Result type alias for classforge operations.
pub type ForgeResult<T> = Result<T, ForgeError>;
