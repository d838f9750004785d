use super::handle::BindingHandle;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_LOOK: &str = "default";
pub const OVERRIDE_LOOK: &str = "override";

/// Classification of a catalog entry against the live bindings.
///
/// Variants are declared from least to most fresh, so the derived ordering is
/// `NotPlugged < AnteriorVersionPlugged < AlreadyPlugged`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlugState {
    NotPlugged,
    AnteriorVersionPlugged,
    AlreadyPlugged,
}

impl fmt::Display for PlugState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlugState::NotPlugged => "not plugged",
            PlugState::AnteriorVersionPlugged => "anterior version plugged",
            PlugState::AlreadyPlugged => "already plugged",
        };
        f.write_str(label)
    }
}

/// One discoverable look file and its relation to the live bindings.
///
/// `binding_ref` is present exactly when `plug_state` is not `NotPlugged`; the
/// fields are private so that only the `mark_*` transitions can change them.
///
/// `lineage_bindings` lists every live binding of the entry's lineage, the
/// exact one included, in the order they were recorded. It contains
/// `binding_ref` whenever that is set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LookEntry {
    name: String,
    path: String,
    plug_state: PlugState,
    binding_ref: Option<BindingHandle>,
    #[serde(default)]
    lineage_bindings: Vec<BindingHandle>,
}

impl LookEntry {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            plug_state: PlugState::NotPlugged,
            binding_ref: None,
            lineage_bindings: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn plug_state(&self) -> PlugState {
        self.plug_state
    }

    pub fn binding_ref(&self) -> Option<BindingHandle> {
        self.binding_ref
    }

    pub fn lineage_bindings(&self) -> &[BindingHandle] {
        &self.lineage_bindings
    }

    pub fn is_bound(&self) -> bool {
        self.plug_state != PlugState::NotPlugged
    }

    /// `default` and `override` must be plugged for the standin to count as up to date.
    pub fn is_mandatory(&self) -> bool {
        self.name == DEFAULT_LOOK || self.name == OVERRIDE_LOOK
    }

    pub fn mark_already_plugged(&mut self, binding: BindingHandle) {
        self.record_lineage(binding);
        self.plug_state = PlugState::AlreadyPlugged;
        self.binding_ref = Some(binding);
    }

    /// Records a binding of the same lineage at another version.
    ///
    /// An exact match always wins: returns `false` and keeps state and
    /// `binding_ref` when it is already `AlreadyPlugged`. The binding is
    /// recorded in `lineage_bindings` either way.
    pub fn mark_anterior_version(&mut self, binding: BindingHandle) -> bool {
        self.record_lineage(binding);
        if self.plug_state == PlugState::AlreadyPlugged {
            return false;
        }
        self.plug_state = PlugState::AnteriorVersionPlugged;
        self.binding_ref = Some(binding);
        true
    }

    fn record_lineage(&mut self, binding: BindingHandle) {
        if !self.lineage_bindings.contains(&binding) {
            self.lineage_bindings.push(binding);
        }
    }
}

/// Snapshot of every look of one standin, keyed by look name.
///
/// Insertion order is `default`, `override` (if any), then sub-looks in
/// ascending name order. A catalog is stale as soon as any binding changes.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct LookCatalog {
    entries: IndexMap<String, LookEntry>,
}

impl LookCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, replacing any previous entry of the same name in place.
    pub fn insert(&mut self, entry: LookEntry) {
        self.entries.insert(entry.name.clone(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&LookEntry> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut LookEntry> {
        self.entries.get_mut(name)
    }

    /// Entry whose resolved file is exactly `path`.
    pub fn find_by_path(&self, path: &str) -> Option<&LookEntry> {
        self.entries.values().find(|entry| entry.path == path)
    }

    pub fn entries(&self) -> impl Iterator<Item = &LookEntry> {
        self.entries.values()
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut LookEntry> {
        self.entries.values_mut()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries that currently have a live binding, in catalog order.
    pub fn bound_entries(&self) -> impl Iterator<Item = &LookEntry> {
        self.entries.values().filter(|entry| entry.is_bound())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mandatory looks are plugged and no look lags behind its latest version.
    pub fn is_up_to_date(&self) -> bool {
        self.entries.values().all(|entry| match entry.plug_state {
            PlugState::AnteriorVersionPlugged => false,
            PlugState::NotPlugged => !entry.is_mandatory(),
            PlugState::AlreadyPlugged => true,
        })
    }
}
