//! The name-to-type lookup seam.
//!
//! The registry only ever deals in opaque [`ClassId`]s; turning a resolved
//! identity into a live instance is delegated to a [`TypeCatalog`]. The
//! trait keeps the seam pluggable the same way the storage layer is: an
//! in-memory implementation for embedded use and tests, other backends
//! (code generation, plugin tables) free to implement the same contract.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::BuildError;
use crate::identity::ClassId;
use crate::value::Value;

/// A boxed constructor: arguments in, opaque instance out.
pub type Constructor =
    dyn Fn(&[Value]) -> Result<Box<dyn Any + Send>, BuildError> + Send + Sync;

/// Maps identities to instantiable types.
///
/// Implementations own the actual construction; the facade forwards the
/// resolved identity and arguments unchanged and adds no validation.
pub trait TypeCatalog: Send + Sync {
    /// Constructs an instance of the type registered under `identity`.
    ///
    /// # Errors
    ///
    /// [`BuildError::UnknownType`] when no constructor is registered for
    /// `identity`; constructor failures propagate unchanged.
    fn construct(
        &self,
        identity: &ClassId,
        args: &[Value],
    ) -> Result<Box<dyn Any + Send>, BuildError>;

    /// Returns true if a constructor is registered under `identity`.
    fn contains(&self, identity: &ClassId) -> bool;
}

fn lock_err(context: &'static str) -> BuildError {
    BuildError::LockPoisoned { context }
}

/// Thread-safe in-memory catalog of constructor closures.
///
/// # Examples
///
/// ```
/// use classforge::{ClassId, InMemoryCatalog, TypeCatalog, Value};
///
/// let catalog = InMemoryCatalog::new();
/// catalog.register(ClassId::new("Widget"), |_args| Ok(Box::new(42_u32)))?;
///
/// let instance = catalog.construct(&ClassId::new("Widget"), &[])?;
/// assert_eq!(instance.downcast_ref::<u32>(), Some(&42));
/// # Ok::<(), classforge::BuildError>(())
/// ```
#[derive(Default)]
pub struct InMemoryCatalog {
    constructors: RwLock<HashMap<ClassId, Arc<Constructor>>>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs (or replaces) the constructor for `identity`.
    ///
    /// # Errors
    ///
    /// [`BuildError::LockPoisoned`] only.
    pub fn register<F>(&self, identity: ClassId, ctor: F) -> Result<(), BuildError>
    where
        F: Fn(&[Value]) -> Result<Box<dyn Any + Send>, BuildError> + Send + Sync + 'static,
    {
        let mut ctors = self
            .constructors
            .write()
            .map_err(|_| lock_err("catalog.register"))?;
        ctors.insert(identity, Arc::new(ctor));
        Ok(())
    }

    /// Installs a zero-argument constructor producing `T::default()`.
    ///
    /// # Errors
    ///
    /// [`BuildError::LockPoisoned`] only.
    pub fn register_default<T>(&self, identity: ClassId) -> Result<(), BuildError>
    where
        T: Default + Send + 'static,
    {
        self.register(identity, |_args| Ok(Box::new(T::default())))
    }
}

impl TypeCatalog for InMemoryCatalog {
    fn construct(
        &self,
        identity: &ClassId,
        args: &[Value],
    ) -> Result<Box<dyn Any + Send>, BuildError> {
        let ctor = {
            let ctors = self
                .constructors
                .read()
                .map_err(|_| lock_err("catalog.construct"))?;
            ctors
                .get(identity)
                .cloned()
                .ok_or_else(|| BuildError::UnknownType {
                    identity: identity.clone(),
                })?
        };
        // Invoke outside the lock; constructors are arbitrary user code.
        ctor(args)
    }

    fn contains(&self, identity: &ClassId) -> bool {
        self.constructors
            .read()
            .map(|ctors| ctors.contains_key(identity))
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for InMemoryCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.constructors.read().map(|c| c.len()).unwrap_or(0);
        f.debug_struct("InMemoryCatalog")
            .field("constructors", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time test: ensure the trait is object-safe.
    fn _assert_type_catalog_object_safe(_: &dyn TypeCatalog) {}

    #[derive(Debug, Default, PartialEq)]
    struct Widget {
        label: String,
    }

    fn id(s: &str) -> ClassId {
        ClassId::new(s)
    }

    #[test]
    fn test_construct_unknown_type() {
        let catalog = InMemoryCatalog::new();
        let err = catalog.construct(&id("Ghost"), &[]).unwrap_err();
        assert!(matches!(err, BuildError::UnknownType { .. }));
    }

    #[test]
    fn test_register_and_construct() {
        let catalog = InMemoryCatalog::new();
        catalog
            .register(id("Widget"), |args| {
                let label = args
                    .first()
                    .and_then(Value::as_string)
                    .unwrap_or_default()
                    .to_string();
                Ok(Box::new(Widget { label }))
            })
            .unwrap();

        assert!(catalog.contains(&id("Widget")));

        let instance = catalog
            .construct(&id("Widget"), &[Value::from("hello")])
            .unwrap();
        let widget = instance.downcast_ref::<Widget>().unwrap();
        assert_eq!(widget.label, "hello");
    }

    #[test]
    fn test_register_default() {
        let catalog = InMemoryCatalog::new();
        catalog.register_default::<Widget>(id("Widget")).unwrap();

        let instance = catalog.construct(&id("Widget"), &[]).unwrap();
        assert_eq!(instance.downcast_ref::<Widget>(), Some(&Widget::default()));
    }

    #[test]
    fn test_register_replaces_constructor() {
        let catalog = InMemoryCatalog::new();
        catalog.register(id("N"), |_| Ok(Box::new(1_i64))).unwrap();
        catalog.register(id("N"), |_| Ok(Box::new(2_i64))).unwrap();

        let instance = catalog.construct(&id("N"), &[]).unwrap();
        assert_eq!(instance.downcast_ref::<i64>(), Some(&2));
    }

    #[test]
    fn test_constructor_failure_propagates() {
        let catalog = InMemoryCatalog::new();
        catalog
            .register(id("Picky"), |args| {
                if args.is_empty() {
                    Err(BuildError::constructor(id("Picky"), "needs one argument"))
                } else {
                    Ok(Box::new(()))
                }
            })
            .unwrap();

        let err = catalog.construct(&id("Picky"), &[]).unwrap_err();
        let BuildError::Constructor { message, .. } = err else {
            panic!("expected Constructor, got {err:?}");
        };
        assert_eq!(message, "needs one argument");
    }
}
