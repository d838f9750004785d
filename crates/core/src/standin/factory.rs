//! Standin factory: from host objects to resolved [`LookStandin`]s.

use super::look_standin::LookStandin;
use crate::config::LoaderConfig;
use crate::profile::{VariantKind, VariantProfile};
use lookloader_api::{AssetRef, SceneBindingService, SelectionProvider, StandinObject};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// `.../abc/<name>_mod.vNNN.abc` or `.../abc_fur/<name>_NN_fur.abc`
static STANDIN_SOURCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.*[\\/](abc|abc_fur)[\\/].*?(?:(.+)_mod\.v[0-9]{3}|(\w+)_[0-9]{2}_fur)\.abc$")
        .expect("Invalid standin source pattern")
});

/// Variant and asset name encoded in a standin's geometry source path.
pub fn identify(source_path: &str) -> Option<(VariantKind, String)> {
    let caps = STANDIN_SOURCE.captures(source_path)?;
    let (kind, name) = match caps.get(1)?.as_str() {
        "abc_fur" => (VariantKind::Fur, caps.get(3)?),
        _ => (VariantKind::Asset, caps.get(2)?),
    };
    Some((kind, name.as_str().to_string()))
}

pub struct StandinFactory {
    project_root: PathBuf,
    skip_prefixes: Vec<String>,
}

impl StandinFactory {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            skip_prefixes: Vec::new(),
        }
    }

    pub fn from_config(config: &LoaderConfig) -> crate::Result<Self> {
        Ok(Self::new(config.require_project_root()?).with_skip_prefixes(config.skip_prefixes.clone()))
    }

    pub fn with_skip_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.skip_prefixes = prefixes;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Resolve one host object. `None` when the object is not a recognized
    /// standin or its asset cannot be resolved.
    pub fn generate(
        &self,
        object: &StandinObject,
        service: &dyn SceneBindingService,
    ) -> Option<LookStandin> {
        let source_path = object.source_path.as_deref()?;
        let Some((kind, asset_name)) = identify(source_path) else {
            debug!(
                "Skipping {}: {} follows no standin convention",
                object.object_name, source_path
            );
            return None;
        };

        let asset = AssetRef::new(asset_name, object.object_name.as_str(), object.handle);
        match LookStandin::resolve(
            &self.project_root,
            asset,
            VariantProfile::for_kind(kind),
            service,
        ) {
            Ok(standin) => Some(standin),
            Err(e) if e.invalidates_asset() => {
                warn!("Standin {} is invalid: {}", object.object_name, e);
                None
            }
            Err(e) => {
                warn!("Failed to resolve standin {}: {}", object.object_name, e);
                None
            }
        }
    }

    /// Resolve the selected standins, or every standin when nothing is selected.
    ///
    /// Result is keyed and ordered by object name.
    pub fn collect(
        &self,
        selection: &dyn SelectionProvider,
        service: &dyn SceneBindingService,
    ) -> BTreeMap<String, LookStandin> {
        let selected = selection.selected_standins();
        let objects: Vec<StandinObject> = if selected.is_empty() {
            selection
                .all_standins()
                .into_iter()
                .filter(|o| !self.is_skipped(&o.object_name))
                .collect()
        } else {
            selected
        };

        let standins: BTreeMap<String, LookStandin> = objects
            .iter()
            .filter_map(|object| self.generate(object, service))
            .map(|standin| (standin.object_name().to_string(), standin))
            .collect();

        info!(
            "Resolved {} standin(s) out of {} object(s)",
            standins.len(),
            objects.len()
        );
        standins
    }

    fn is_skipped(&self, object_name: &str) -> bool {
        self.skip_prefixes
            .iter()
            .any(|prefix| object_name.starts_with(prefix.as_str()))
    }
}
