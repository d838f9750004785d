//! Geometry (UV) source resolution for the asset variant.
//!
//! Candidates live in `<root>/assets/<asset>/abc` and are named
//! `*mod.vNNN.abc` (case-insensitive). Files without a version segment match
//! the convention but cannot be compared, so they are left out.

use crate::error::Result;
use crate::util::{file_name, normalize_path};
use lookloader_api::{AssetRef, SceneBindingService, UvCandidate, UvSource};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

static MOD_FILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^.*mod(?:\.v([0-9]{3}))?\.abc$").expect("Invalid mod file pattern")
});

pub fn abc_dir(root: &Path, asset_name: &str) -> PathBuf {
    root.join("assets").join(asset_name).join("abc")
}

/// Version of a geometry source path, `None` if it is not a versioned mod file.
pub fn parse_mod_version(path: &str) -> Option<u32> {
    MOD_FILE
        .captures(file_name(path))?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

/// Collect the versioned mod files of an asset, newest first.
///
/// A missing `abc` folder yields an empty source.
pub fn resolve_uvs(root: &Path, asset_name: &str) -> UvSource {
    let dir = abc_dir(root, asset_name);
    if !dir.is_dir() {
        debug!("No abc folder for {} at {}", asset_name, dir.display());
        return UvSource::default();
    }

    let candidates = WalkDir::new(&dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let path = normalize_path(e.path());
            match parse_mod_version(&path) {
                Some(version) => Some(UvCandidate { version, path }),
                None => {
                    if MOD_FILE.is_match(file_name(&path)) {
                        debug!("Skipping unversioned mod file {}", path);
                    }
                    None
                }
            }
        })
        .collect();

    UvSource::new(candidates)
}

/// The live source reads the newest candidate. Vacuously true without candidates.
pub fn is_up_to_date(uvs: &UvSource, live_source: Option<&str>) -> bool {
    let Some(head) = uvs.head() else {
        return true;
    };
    live_source.and_then(parse_mod_version) == Some(head.version)
}

/// Point the standin's geometry source at the newest candidate.
///
/// Returns `false` (and logs a warning) when there is nothing to update to.
pub fn update_source(
    uvs: &UvSource,
    asset: &AssetRef,
    service: &mut dyn SceneBindingService,
) -> Result<bool> {
    let Some(head) = uvs.head() else {
        warn!("No mod files found for {}", asset.object_name);
        return Ok(false);
    };

    service.set_source_path(asset.scene_handle, &head.path)?;
    info!("Updated geometry source of {} to {}", asset.object_name, head.path);
    Ok(true)
}
