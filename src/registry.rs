//! The override registry.
//!
//! One logical table mapping every referenced identity to its
//! [`OverrideRecord`], plus the registry-wide disable set. All state sits
//! behind a single `RwLock`: mutations take the write lock, resolution and
//! rendering read a consistent snapshot under the read lock.
//!
//! Records are created lazily on first reference, whichever direction the
//! reference comes from, so overrides can name classes that have not been
//! declared yet.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::error::RegistryError;
use crate::identity::ClassId;
use crate::record::OverrideRecord;
use crate::report;

fn lock_err(context: &'static str) -> RegistryError {
    RegistryError::LockPoisoned { context }
}

#[derive(Debug, Default)]
struct RegistryState {
    records: HashMap<ClassId, OverrideRecord>,
    // Registration order, for deterministic rendering.
    order: Vec<ClassId>,
    global_disables: Vec<ClassId>,
}

impl RegistryState {
    fn ensure_record(&mut self, id: &ClassId) -> &mut OverrideRecord {
        match self.records.entry(id.clone()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                self.order.push(id.clone());
                e.insert(OverrideRecord::new(id.clone()))
            }
        }
    }

    /// Walks the parent chain upwards from `start`, collecting every
    /// registered ancestor. Fails if the walk revisits a node or reaches
    /// `child`, which would make the declaration below `child` cyclic.
    fn ancestor_chain(
        &self,
        start: &ClassId,
        child: &ClassId,
    ) -> Result<Vec<ClassId>, RegistryError> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = start.clone();
        loop {
            if cursor == *child || !seen.insert(cursor.clone()) {
                return Err(RegistryError::ParentCycle { identity: cursor });
            }
            let next = self.records.get(&cursor).and_then(|r| r.parent().cloned());
            chain.push(cursor);
            match next {
                Some(parent) => cursor = parent,
                None => return Ok(chain),
            }
        }
    }
}

/// Process-wide table of override records and the global disable set.
///
/// # Examples
///
/// ```
/// use classforge::{ClassId, OverrideRegistry};
///
/// let registry = OverrideRegistry::new();
/// let base = ClassId::new("Base");
/// let sub = ClassId::new("Sub");
///
/// registry.declare_subtype(&base, &sub)?;
/// assert_eq!(registry.resolve(&base)?, sub);
/// # Ok::<(), classforge::RegistryError>(())
/// ```
#[derive(Debug, Default)]
pub struct OverrideRegistry {
    state: RwLock<RegistryState>,
}

impl OverrideRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `identity`, creating its record if absent.
    ///
    /// When `parent` is given and the record's parent is currently nil it is
    /// set; re-registering with the same parent succeeds silently. The
    /// parent identity is itself registered, with no parent of its own.
    ///
    /// # Errors
    ///
    /// [`RegistryError::ConflictingParent`] when a different non-nil parent
    /// is already on record. A failed call leaves the registry untouched.
    pub fn register(
        &self,
        identity: &ClassId,
        parent: Option<&ClassId>,
    ) -> Result<(), RegistryError> {
        let mut state = self.state.write().map_err(|_| lock_err("register"))?;
        match parent {
            Some(p) => {
                // Parent assignment is checked before the parent record is
                // created so a conflict leaves no partial mutation.
                state.ensure_record(identity).set_parent(p.clone())?;
                state.ensure_record(p);
            }
            None => {
                state.ensure_record(identity);
            }
        }
        Ok(())
    }

    /// Records that `child` was declared as a subtype of `parent`.
    ///
    /// Registers `child` with its parent set, then appends `child` to the
    /// inherited candidates of `parent` and of every registered ancestor
    /// above it, so the deepest subtype is visible to the whole chain.
    ///
    /// # Errors
    ///
    /// [`RegistryError::ConflictingParent`] when `child` already has a
    /// different parent; [`RegistryError::ParentCycle`] when the declaration
    /// would make the parent chain loop. Either failure leaves the registry
    /// untouched.
    pub fn declare_subtype(
        &self,
        parent: &ClassId,
        child: &ClassId,
    ) -> Result<(), RegistryError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| lock_err("declare_subtype"))?;

        // Conflict check first: it must fail without creating records or
        // touching candidate lists.
        if let Some(record) = state.records.get(child) {
            if let Some(existing) = record.parent() {
                if existing != parent {
                    return Err(RegistryError::ConflictingParent {
                        identity: child.clone(),
                        existing: existing.clone(),
                        proposed: parent.clone(),
                    });
                }
            }
        }

        let chain = state.ancestor_chain(parent, child)?;

        state.ensure_record(parent);
        state.ensure_record(child).set_parent(parent.clone())?;
        for ancestor in &chain {
            state
                .ensure_record(ancestor)
                .add_inherited_candidate(child.clone());
        }
        Ok(())
    }

    /// Manually enables `overriding` as an override for `base`.
    ///
    /// Appends to the base's manual overrides and lifts any local disable on
    /// the name. Both identities get records on first reference.
    ///
    /// # Errors
    ///
    /// [`RegistryError::LockPoisoned`] only.
    pub fn enable_override(
        &self,
        base: &ClassId,
        overriding: &ClassId,
    ) -> Result<(), RegistryError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| lock_err("enable_override"))?;
        state.ensure_record(overriding);
        state.ensure_record(base).enable_override(overriding);
        Ok(())
    }

    /// Suppresses `overriding` as an override for `base` only.
    ///
    /// Candidate lists are never shrunk; the name joins the base's local
    /// disable set consulted at resolution time.
    ///
    /// # Errors
    ///
    /// [`RegistryError::LockPoisoned`] only.
    pub fn disable_override(
        &self,
        base: &ClassId,
        overriding: &ClassId,
    ) -> Result<(), RegistryError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| lock_err("disable_override"))?;
        state.ensure_record(overriding);
        state.ensure_record(base).disable_override(overriding);
        Ok(())
    }

    /// Suppresses `identity` as an override candidate for every base.
    ///
    /// # Errors
    ///
    /// [`RegistryError::LockPoisoned`] only.
    pub fn global_disable(&self, identity: &ClassId) -> Result<(), RegistryError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| lock_err("global_disable"))?;
        if !state.global_disables.contains(identity) {
            state.global_disables.push(identity.clone());
        }
        Ok(())
    }

    /// Cancels a previous [`global_disable`](Self::global_disable).
    ///
    /// # Errors
    ///
    /// [`RegistryError::LockPoisoned`] only.
    pub fn remove_global_disable(&self, identity: &ClassId) -> Result<(), RegistryError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| lock_err("remove_global_disable"))?;
        state.global_disables.retain(|d| d != identity);
        Ok(())
    }

    /// Returns a snapshot of the global disable set, in first-disable order.
    ///
    /// # Errors
    ///
    /// [`RegistryError::LockPoisoned`] only.
    pub fn global_disables(&self) -> Result<Vec<ClassId>, RegistryError> {
        let state = self
            .state
            .read()
            .map_err(|_| lock_err("global_disables"))?;
        Ok(state.global_disables.clone())
    }

    /// Resolves the identity to instantiate in place of `base`.
    ///
    /// Manual overrides are tried most-recent first, then inherited
    /// candidates most-recent first, skipping anything locally or globally
    /// disabled; an exhausted scan yields `base` itself. The scan runs under
    /// the read lock, so it always observes a consistent snapshot.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Unregistered`] when `base` has no record.
    pub fn resolve(&self, base: &ClassId) -> Result<ClassId, RegistryError> {
        let state = self.state.read().map_err(|_| lock_err("resolve"))?;
        let record = state
            .records
            .get(base)
            .ok_or_else(|| RegistryError::Unregistered {
                identity: base.clone(),
            })?;
        Ok(record.resolve_with(&state.global_disables))
    }

    /// Clears the global disable set and every record's manual overrides and
    /// local disables. Inheritance facts survive.
    ///
    /// # Errors
    ///
    /// [`RegistryError::LockPoisoned`] only.
    pub fn reset_all(&self) -> Result<(), RegistryError> {
        let mut state = self.state.write().map_err(|_| lock_err("reset_all"))?;
        state.global_disables.clear();
        for record in state.records.values_mut() {
            record.reset();
        }
        Ok(())
    }

    /// Returns true if `identity` has a record.
    ///
    /// # Errors
    ///
    /// [`RegistryError::LockPoisoned`] only.
    pub fn is_registered(&self, identity: &ClassId) -> Result<bool, RegistryError> {
        let state = self.state.read().map_err(|_| lock_err("is_registered"))?;
        Ok(state.records.contains_key(identity))
    }

    /// Returns a cloned snapshot of the record for `identity`, if any.
    ///
    /// # Errors
    ///
    /// [`RegistryError::LockPoisoned`] only.
    pub fn record(&self, identity: &ClassId) -> Result<Option<OverrideRecord>, RegistryError> {
        let state = self.state.read().map_err(|_| lock_err("record"))?;
        Ok(state.records.get(identity).cloned())
    }

    /// Returns every registered identity, in registration order.
    ///
    /// # Errors
    ///
    /// [`RegistryError::LockPoisoned`] only.
    pub fn registered(&self) -> Result<Vec<ClassId>, RegistryError> {
        let state = self.state.read().map_err(|_| lock_err("registered"))?;
        Ok(state.order.clone())
    }

    /// Number of registered identities.
    ///
    /// # Errors
    ///
    /// [`RegistryError::LockPoisoned`] only.
    pub fn len(&self) -> Result<usize, RegistryError> {
        let state = self.state.read().map_err(|_| lock_err("len"))?;
        Ok(state.records.len())
    }

    /// Returns true if no identity is registered.
    ///
    /// # Errors
    ///
    /// [`RegistryError::LockPoisoned`] only.
    pub fn is_empty(&self) -> Result<bool, RegistryError> {
        Ok(self.len()? == 0)
    }

    /// Renders the fixed-format diagnostic block for `base`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Unregistered`] when `base` has no record.
    pub fn describe(&self, base: &ClassId) -> Result<String, RegistryError> {
        let state = self.state.read().map_err(|_| lock_err("describe"))?;
        let record = state
            .records
            .get(base)
            .ok_or_else(|| RegistryError::Unregistered {
                identity: base.clone(),
            })?;
        let resolved = record.resolve_with(&state.global_disables);
        let mut out = String::new();
        report::render_record(record, &resolved, &mut out);
        Ok(out)
    }

    /// Renders the global disable summary followed by one diagnostic block
    /// per registered identity, in registration order.
    ///
    /// # Errors
    ///
    /// [`RegistryError::LockPoisoned`] only.
    pub fn describe_all(&self) -> Result<String, RegistryError> {
        let state = self.state.read().map_err(|_| lock_err("describe_all"))?;
        let mut out = String::new();
        report::render_header(&state.global_disables, &mut out);
        for id in &state.order {
            if let Some(record) = state.records.get(id) {
                let resolved = record.resolve_with(&state.global_disables);
                report::render_record(record, &resolved, &mut out);
            }
        }
        Ok(out)
    }
}
