use lookloader_api::{AssetRef, SceneHandle};
use lookloader_core::util::normalize_path;
use lookloader_core::{InMemoryScene, LookStandin, VariantProfile};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway project tree under a temp dir.
pub struct Project {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl Project {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create an empty file at `relative` and return its normalized path.
    pub fn touch(&self, relative: &str) -> String {
        let path: PathBuf = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"").unwrap();
        normalize_path(&path)
    }
}

#[allow(dead_code)]
pub fn resolve(project: &Project, scene: &InMemoryScene, asset: &str, object: &str) -> LookStandin {
    resolve_with(project, scene, asset, object, VariantProfile::ASSET)
}

#[allow(dead_code)]
pub fn resolve_with(
    project: &Project,
    scene: &InMemoryScene,
    asset: &str,
    object: &str,
    profile: VariantProfile,
) -> LookStandin {
    let handle: SceneHandle = scene.find_standin(object).unwrap().handle;
    LookStandin::resolve(project.root(), AssetRef::new(asset, object, handle), profile, scene)
        .unwrap()
}
