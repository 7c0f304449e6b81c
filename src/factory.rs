//! Construction facade.
//!
//! A [`Factory`] couples an [`OverrideRegistry`] with a [`TypeCatalog`]:
//! callers ask for a base identity and receive an instance of whatever the
//! registry resolves that base to. The facade adds no validation of its
//! own; catalog and constructor failures propagate unchanged.

use std::any::Any;
use std::sync::Arc;

use crate::catalog::TypeCatalog;
use crate::error::{BuildError, ForgeResult};
use crate::identity::ClassId;
use crate::registry::OverrideRegistry;
use crate::value::Value;

/// Resolves a base identity and constructs the winning type.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use classforge::{ClassId, Factory, InMemoryCatalog, OverrideRegistry};
///
/// let registry = Arc::new(OverrideRegistry::new());
/// let catalog = Arc::new(InMemoryCatalog::new());
///
/// registry.declare_subtype(&ClassId::new("Job"), &ClassId::new("RetryingJob"))?;
/// catalog.register(ClassId::new("RetryingJob"), |_args| Ok(Box::new(3_u8)))?;
///
/// let factory = Factory::new(registry, catalog);
/// let retries = factory.create_as::<u8>(&ClassId::new("Job"), &[])?;
/// assert_eq!(*retries, 3);
/// # Ok::<(), classforge::ForgeError>(())
/// ```
#[derive(Clone)]
pub struct Factory {
    registry: Arc<OverrideRegistry>,
    catalog: Arc<dyn TypeCatalog>,
}

impl Factory {
    /// Creates a facade over the given registry and catalog.
    #[must_use]
    pub fn new(registry: Arc<OverrideRegistry>, catalog: Arc<dyn TypeCatalog>) -> Self {
        Self { registry, catalog }
    }

    /// Access the underlying registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<OverrideRegistry> {
        &self.registry
    }

    /// Access the underlying catalog.
    #[must_use]
    pub fn catalog(&self) -> &Arc<dyn TypeCatalog> {
        &self.catalog
    }

    /// Resolves `base` and constructs the resulting identity with `args`.
    ///
    /// # Errors
    ///
    /// [`crate::RegistryError::Unregistered`] when `base` has no record;
    /// [`BuildError::UnknownType`] when the resolved identity has no
    /// constructor; constructor failures propagate unchanged.
    pub fn create(&self, base: &ClassId, args: &[Value]) -> ForgeResult<Box<dyn Any + Send>> {
        let resolved = self.registry.resolve(base)?;
        Ok(self.catalog.construct(&resolved, args)?)
    }

    /// Like [`create`](Self::create), but downcasts the instance to `T`.
    ///
    /// # Errors
    ///
    /// Everything [`create`](Self::create) can fail with, plus
    /// [`BuildError::WrongType`] when the constructed instance is not a `T`.
    pub fn create_as<T: 'static>(&self, base: &ClassId, args: &[Value]) -> ForgeResult<Box<T>> {
        let resolved = self.registry.resolve(base)?;
        let instance = self.catalog.construct(&resolved, args)?;
        instance
            .downcast::<T>()
            .map_err(|_| BuildError::WrongType { identity: resolved }.into())
    }
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
