//! Per-class override state.
//!
//! An [`OverrideRecord`] tracks everything the registry knows about one
//! identity: its declared parent, the subtypes inheritance has contributed
//! as override candidates, the overrides enabled by hand, and the names
//! locally suppressed. Resolution is a pure scan over this state; nothing
//! is cached, so toggling a disable immediately changes future resolutions.

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::identity::ClassId;

/// Override state for a single registered identity.
///
/// Records are created lazily by the registry on first reference and live
/// for the registry's lifetime. The candidate lists are append-only;
/// disabling only adds to a disable set consulted at resolution time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideRecord {
    class_id: ClassId,
    parent: Option<ClassId>,
    inherited_candidates: Vec<ClassId>,
    manual_overrides: Vec<ClassId>,
    local_disables: Vec<ClassId>,
}

impl OverrideRecord {
    /// Creates an empty record for `class_id`.
    #[must_use]
    pub fn new(class_id: ClassId) -> Self {
        Self {
            class_id,
            parent: None,
            inherited_candidates: Vec::new(),
            manual_overrides: Vec::new(),
            local_disables: Vec::new(),
        }
    }

    /// Returns this record's own identity.
    #[must_use]
    pub fn class_id(&self) -> &ClassId {
        &self.class_id
    }

    /// Returns the declared immediate supertype, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&ClassId> {
        self.parent.as_ref()
    }

    /// Candidates contributed by subtype declarations, in declaration order.
    #[must_use]
    pub fn inherited_candidates(&self) -> &[ClassId] {
        &self.inherited_candidates
    }

    /// Manually enabled overrides, in enable order. May contain duplicates.
    #[must_use]
    pub fn manual_overrides(&self) -> &[ClassId] {
        &self.manual_overrides
    }

    /// Identities suppressed for this record only, in first-disable order.
    #[must_use]
    pub fn local_disables(&self) -> &[ClassId] {
        &self.local_disables
    }

    /// Sets the parent identity. Write-once: a second, different non-nil
    /// value fails with [`RegistryError::ConflictingParent`]; re-setting the
    /// same value succeeds silently.
    ///
    /// # Errors
    ///
    /// Returns `ConflictingParent` when a different parent is already set.
    pub fn set_parent(&mut self, parent: ClassId) -> Result<(), RegistryError> {
        match &self.parent {
            Some(existing) if *existing != parent => Err(RegistryError::ConflictingParent {
                identity: self.class_id.clone(),
                existing: existing.clone(),
                proposed: parent,
            }),
            Some(_) => Ok(()),
            None => {
                self.parent = Some(parent);
                Ok(())
            }
        }
    }

    /// Appends a subtype contributed by inheritance.
    pub fn add_inherited_candidate(&mut self, candidate: ClassId) {
        self.inherited_candidates.push(candidate);
    }

    /// Appends a manual override and lifts any local disable on it.
    pub fn enable_override(&mut self, name: &ClassId) {
        self.manual_overrides.push(name.clone());
        self.local_disables.retain(|d| d != name);
    }

    /// Suppresses `name` for this record. The candidate lists are untouched.
    pub fn disable_override(&mut self, name: &ClassId) {
        if !self.local_disables.contains(name) {
            self.local_disables.push(name.clone());
        }
    }

    /// Resolves the identity to instantiate in place of this record's class.
    ///
    /// Scans the combined candidate sequence (inherited candidates followed
    /// by manual overrides) from the most recently appended entry backwards
    /// and returns the first candidate absent from both the local and the
    /// given global disable set. Falls back to the record's own identity
    /// when every candidate is suppressed.
    #[must_use]
    pub fn resolve_with(&self, global_disables: &[ClassId]) -> ClassId {
        self.manual_overrides
            .iter()
            .rev()
            .chain(self.inherited_candidates.iter().rev())
            .find(|&c| !self.local_disables.contains(c) && !global_disables.contains(c))
            .cloned()
            .unwrap_or_else(|| self.class_id.clone())
    }

    /// Clears manual overrides and local disables.
    ///
    /// Inheritance facts are structural and survive a reset: `class_id`,
    /// `parent`, and `inherited_candidates` are preserved.
    pub fn reset(&mut self) {
        self.manual_overrides.clear();
        self.local_disables.clear();
    }
}
