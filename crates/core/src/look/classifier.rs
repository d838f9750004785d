//! Binding classifier.
//!
//! Compares discovered looks with the live bindings of a standin and assigns
//! each look a [`PlugState`](lookloader_api::PlugState). A binding that does
//! not point at the exact file may still belong to the same look *lineage*:
//! its path with the version and extension stripped (the root path) is a
//! prefix of the look's path.

use super::discovery::DiscoveredLook;
use crate::error::{LookError, Result};
use crate::profile::VariantProfile;
use crate::util::normalize_separators;
use indexmap::IndexMap;
use lookloader_api::{BindingHandle, LookCatalog, LookEntry};
use regex::Regex;
use tracing::debug;

/// Shape of the tail that follows a look's root path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailFamily {
    /// `<root>.vNNN.ass`
    Versioned,
    /// `<root>.ass`, the override convention
    Unversioned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lineage {
    pub root: String,
    pub family: TailFamily,
}

impl Lineage {
    /// `path` starts with this root and the next character opens the tail.
    pub fn contains(&self, path: &str) -> bool {
        path.strip_prefix(self.root.as_str())
            .is_some_and(|rest| rest.starts_with('.'))
    }
}

pub struct BindingClassifier {
    versioned: Regex,
    unversioned: Option<Regex>,
}

impl BindingClassifier {
    pub fn new(profile: &VariantProfile) -> Result<Self> {
        let suffix = regex::escape(profile.operator_suffix);
        let tail = if profile.has_override {
            format!("(?:_override|{suffix})")
        } else {
            suffix
        };

        let versioned = Regex::new(&format!(r"^(.+{tail})\.v[0-9]+\.ass$"))?;
        let unversioned = if profile.has_override {
            Some(Regex::new(&format!(r"^(.+{tail})\.ass$"))?)
        } else {
            None
        };

        Ok(Self {
            versioned,
            unversioned,
        })
    }

    /// Root path and tail family of a look file, `None` if it follows no known convention.
    pub fn lineage(&self, path: &str) -> Option<Lineage> {
        if let Some(caps) = self.versioned.captures(path) {
            return Some(Lineage {
                root: caps.get(1)?.as_str().to_string(),
                family: TailFamily::Versioned,
            });
        }

        let caps = self.unversioned.as_ref()?.captures(path)?;
        Some(Lineage {
            root: caps.get(1)?.as_str().to_string(),
            family: TailFamily::Unversioned,
        })
    }

    /// Build the catalog of `discovered` looks against `bindings` (bound path → handle).
    ///
    /// Bindings are visited in the given order; an exact path match always wins
    /// over a same-lineage match, whichever binding comes first.
    pub fn classify(
        &self,
        discovered: &[DiscoveredLook],
        bindings: &IndexMap<String, BindingHandle>,
    ) -> LookCatalog {
        let mut catalog = LookCatalog::new();
        for look in discovered {
            catalog.insert(LookEntry::new(look.name.as_str(), look.path.as_str()));
        }

        for (raw_path, binding) in bindings {
            let bound_path = normalize_separators(raw_path);
            let Some(lineage) = self.lineage(&bound_path) else {
                debug!("{}", LookError::UnresolvableBindingPath(bound_path));
                continue;
            };

            for entry in catalog.entries_mut() {
                if entry.path() == bound_path {
                    entry.mark_already_plugged(*binding);
                } else if lineage.contains(entry.path())
                    && self.family_of(entry.path()) == Some(lineage.family)
                {
                    entry.mark_anterior_version(*binding);
                }
            }
        }

        catalog
    }

    fn family_of(&self, path: &str) -> Option<TailFamily> {
        self.lineage(path).map(|lineage| lineage.family)
    }
}
