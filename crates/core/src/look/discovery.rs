//! Look discovery.
//!
//! Scans the publish tree of an asset and picks the latest version of every
//! look it can find:
//!
//! ```text
//! <root>/assets/<asset>/publish/
//! ├── <asset><suffix>.v001.ass          default look, versioned
//! ├── <asset><suffix>.v003.ass
//! ├── <asset><suffix>.ass               override look (asset variant only)
//! └── <sublook_folder>/
//!     └── <S>/<asset>_<S><suffix>.v002.ass   sub-look S
//! ```
//!
//! Discovery never looks at bindings; see [`super::classifier`] for that.

use crate::error::{LookError, Result};
use crate::profile::VariantProfile;
use crate::util::normalize_path;
use lookloader_api::{DEFAULT_LOOK, OVERRIDE_LOOK};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A look found on disk, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredLook {
    pub name: String,
    pub path: String,
}

impl DiscoveredLook {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Ordered by version first so `max()` picks the newest file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct VersionedFile {
    version: u32,
    path: String,
}

pub struct LookDiscovery {
    profile: VariantProfile,
}

impl LookDiscovery {
    pub fn new(profile: VariantProfile) -> Self {
        Self { profile }
    }

    pub fn publish_dir(root: &Path, asset_name: &str) -> PathBuf {
        root.join("assets").join(asset_name).join("publish")
    }

    /// Find the default, override and sub-looks of `asset_name`.
    ///
    /// Looks come back in catalog order: `default`, `override`, then sub-looks
    /// sorted by name.
    pub fn discover(&self, root: &Path, asset_name: &str) -> Result<Vec<DiscoveredLook>> {
        let publish_dir = Self::publish_dir(root, asset_name);
        if !publish_dir.is_dir() {
            return Err(LookError::AssetDirectoryMissing {
                path: normalize_path(&publish_dir),
            });
        }

        let name = regex::escape(asset_name);
        let suffix = regex::escape(self.profile.operator_suffix);

        let default_pattern = Regex::new(&format!(r"^{name}{suffix}\.v([0-9]{{3}})\.ass$"))?;
        let default = latest_version(&publish_dir, &default_pattern).ok_or_else(|| {
            LookError::NoDefaultLookFound {
                asset: asset_name.to_string(),
            }
        })?;

        let mut looks = vec![DiscoveredLook::new(DEFAULT_LOOK, default.path)];

        if self.profile.has_override {
            let override_pattern = Regex::new(&format!(r"^{name}{suffix}\.ass$"))?;
            if let Some(path) = find_override(&publish_dir, &override_pattern, asset_name) {
                looks.push(DiscoveredLook::new(OVERRIDE_LOOK, path));
            }
        }

        looks.extend(self.find_sublooks(&publish_dir, asset_name)?);

        debug!(
            "Discovered {} looks for asset {} in {}",
            looks.len(),
            asset_name,
            publish_dir.display()
        );
        Ok(looks)
    }

    fn find_sublooks(&self, publish_dir: &Path, asset_name: &str) -> Result<Vec<DiscoveredLook>> {
        let sublooks_dir = publish_dir.join(self.profile.sublook_folder);
        if !sublooks_dir.is_dir() {
            return Ok(Vec::new());
        }

        let name = regex::escape(asset_name);
        let suffix = regex::escape(self.profile.operator_suffix);
        let mut sublooks = Vec::new();

        for dir in entries(&sublooks_dir).filter(|e| e.file_type().is_dir()) {
            let Some(sublook) = dir.file_name().to_str() else {
                continue;
            };
            if sublook == DEFAULT_LOOK || sublook == OVERRIDE_LOOK {
                warn!(
                    "Ignoring sub-look folder {} of {}: reserved look name",
                    sublook, asset_name
                );
                continue;
            }

            let pattern = Regex::new(&format!(
                r"^{name}_{}{suffix}\.v([0-9]{{3}})\.ass$",
                regex::escape(sublook)
            ))?;
            match latest_version(dir.path(), &pattern) {
                Some(latest) => sublooks.push(DiscoveredLook::new(sublook, latest.path)),
                None => debug!("Sub-look folder {} holds no look for {}", sublook, asset_name),
            }
        }

        sublooks.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sublooks)
    }
}

/// Direct children of `dir`, following symlinks.
fn entries(dir: &Path) -> impl Iterator<Item = walkdir::DirEntry> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
}

/// Highest parsed version among the files of `dir` matching `pattern`.
///
/// The first capture group of `pattern` must be the version number.
fn latest_version(dir: &Path, pattern: &Regex) -> Option<VersionedFile> {
    entries(dir)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let file_name = e.file_name().to_str()?;
            let version = pattern.captures(file_name)?.get(1)?.as_str().parse().ok()?;
            Some(VersionedFile {
                version,
                path: normalize_path(e.path()),
            })
        })
        .max()
}

fn find_override(publish_dir: &Path, pattern: &Regex, asset_name: &str) -> Option<String> {
    let mut candidates: Vec<String> = entries(publish_dir)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_str().is_some_and(|n| pattern.is_match(n)))
        .map(|e| normalize_path(e.path()))
        .collect();
    candidates.sort();

    if candidates.len() > 1 {
        warn!(
            "{}",
            LookError::AmbiguousOverrideLook {
                asset: asset_name.to_string(),
                candidates: candidates.clone(),
            }
        );
    }

    candidates.into_iter().next()
}
