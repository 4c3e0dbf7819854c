//! The caster's chosen reaches.

use std::collections::BTreeSet;

use gr_core::{PrimaryFactor, ReachCatalog, ReachKind};

/// Selected reach names, slotted by kind.
///
/// At most one duration and one primary factor change can be held; picking
/// a second one of either evicts the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReachSelection {
    duration: Option<String>,
    primary_factor: Option<(String, PrimaryFactor)>,
    others: BTreeSet<String>,
}

impl ReachSelection {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `name`, classifying it through the catalog. Names not in the
    /// catalog (spell-specific reaches) go in the general set. Returns
    /// false if it was already selected.
    pub fn select(&mut self, name: &str, catalog: &ReachCatalog) -> bool {
        if self.contains(name) {
            return false;
        }
        let kind = catalog.find(name).map(|r| &r.kind);
        match kind {
            Some(ReachKind::Duration { .. }) => {
                if let Some(old) = self.duration.replace(name.to_string()) {
                    tracing::debug!(evicted = %old, selected = name, "duration replaced");
                }
            }
            Some(ReachKind::PrimaryFactorChange { to }) => {
                if let Some((old, _)) = self
                    .primary_factor
                    .replace((name.to_string(), to.clone()))
                {
                    tracing::debug!(evicted = %old, selected = name, "primary factor change replaced");
                }
            }
            _ => {
                self.others.insert(name.to_string());
            }
        }
        true
    }

    /// Remove `name`. Returns whether it was selected.
    pub fn deselect(&mut self, name: &str) -> bool {
        if self.duration.as_deref() == Some(name) {
            self.duration = None;
            return true;
        }
        if self.primary_factor.as_ref().is_some_and(|(n, _)| n == name) {
            self.primary_factor = None;
            return true;
        }
        self.others.remove(name)
    }

    /// Deselect `name` if selected, otherwise select it. Returns whether it
    /// is selected afterwards.
    pub fn toggle(&mut self, name: &str, catalog: &ReachCatalog) -> bool {
        if self.deselect(name) {
            false
        } else {
            self.select(name, catalog)
        }
    }

    /// Whether `name` is selected.
    pub fn contains(&self, name: &str) -> bool {
        self.duration.as_deref() == Some(name)
            || self.primary_factor.as_ref().is_some_and(|(n, _)| n == name)
            || self.others.contains(name)
    }

    /// The selected duration reach.
    pub fn duration(&self) -> Option<&str> {
        self.duration.as_deref()
    }

    /// The primary factor the selection switches to, if any.
    pub fn primary_factor_override(&self) -> Option<&PrimaryFactor> {
        self.primary_factor.as_ref().map(|(_, to)| to)
    }

    /// Every selected name: duration, then the primary factor change, then
    /// the rest in name order.
    pub fn names(&self) -> Vec<&str> {
        self.duration
            .as_deref()
            .into_iter()
            .chain(self.primary_factor.as_ref().map(|(n, _)| n.as_str()))
            .chain(self.others.iter().map(String::as_str))
            .collect()
    }

    /// Number of selected reaches.
    pub fn len(&self) -> usize {
        usize::from(self.duration.is_some())
            + usize::from(self.primary_factor.is_some())
            + self.others.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
