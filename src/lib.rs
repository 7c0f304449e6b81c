//! # classforge - Subtype-Aware Factory Overrides
//!
//! classforge lets client code register a hierarchy of interchangeable
//! implementation classes under a common base identity and resolve, at
//! construction time, which concrete implementation should actually be
//! instantiated. Subtype declarations register overrides automatically;
//! manual overrides and disables, at class and global granularity, take
//! effect when auto-registration does not produce the desired choice.
//! Identities are plain names, so overrides can be set even before the
//! classes they refer to have been defined.
//!
//! ## Core Concepts
//!
//! - **ClassId**: the opaque name of a base or candidate class
//! - **OverrideRecord**: one identity's override state (parent, inherited
//!   candidates, manual overrides, local disables)
//! - **OverrideRegistry**: the table linking records into an inheritance
//!   chain, plus the global disable set
//! - **Factory**: resolves a base and forwards construction to a
//!   [`TypeCatalog`]
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use classforge::{ClassId, Factory, InMemoryCatalog, OverrideRegistry};
//!
//! let registry = Arc::new(OverrideRegistry::new());
//! let catalog = Arc::new(InMemoryCatalog::new());
//!
//! // The surrounding type system reports subtype declarations.
//! let base = ClassId::new("Codec");
//! let fast = ClassId::new("FastCodec");
//! registry.declare_subtype(&base, &fast)?;
//!
//! // The deepest subtype wins by default.
//! assert_eq!(registry.resolve(&base)?, fast);
//!
//! // Construction goes through the catalog.
//! catalog.register(fast.clone(), |_args| Ok(Box::new("fast".to_string())))?;
//! let factory = Factory::new(registry, catalog);
//! let codec = factory.create_as::<String>(&base, &[])?;
//! assert_eq!(*codec, "fast");
//! # Ok::<(), classforge::ForgeError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod error;
pub mod factory;
pub mod identity;
pub mod record;
pub mod registry;
mod report;
pub mod value;

// Re-export primary types at crate root for convenience
pub use catalog::{Constructor, InMemoryCatalog, TypeCatalog};
pub use error::{BuildError, ForgeError, ForgeResult, RegistryError};
pub use factory::Factory;
pub use identity::ClassId;
pub use record::OverrideRecord;
pub use registry::OverrideRegistry;
pub use value::Value;
