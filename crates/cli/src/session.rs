use lookloader_api::LookCatalog;
use lookloader_core::util::normalize_separators;
use lookloader_core::{InMemoryScene, LoaderConfig, LookStandin, StandinFactory};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A loaded scene document plus the configuration it is resolved against.
pub struct Session {
    pub config: LoaderConfig,
    pub scene: InMemoryScene,
    scene_path: PathBuf,
    factory: StandinFactory,
}

impl Session {
    pub fn open(config: LoaderConfig, scene_path: PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let factory = StandinFactory::from_config(&config)?;
        let scene = InMemoryScene::load(&scene_path)?;
        debug!(
            "Opened scene {} with {} standin(s)",
            scene_path.display(),
            scene.standins().len()
        );

        Ok(Self {
            config,
            scene,
            scene_path,
            factory,
        })
    }

    pub fn root(&self) -> &Path {
        self.factory.project_root()
    }

    pub fn factory(&self) -> &StandinFactory {
        &self.factory
    }

    /// Resolve the standin named `object_name`.
    pub fn standin(&self, object_name: &str) -> Result<LookStandin, Box<dyn std::error::Error>> {
        let record = self
            .scene
            .find_standin(object_name)
            .ok_or_else(|| format!("no standin named '{}' in the scene", object_name))?;

        self.factory
            .generate(&record.to_object(), &self.scene)
            .ok_or_else(|| {
                format!(
                    "'{}' is not a valid look standin, run with --verbose for details",
                    object_name
                )
                .into()
            })
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.scene.save(&self.scene_path)?;
        debug!("Saved scene to {}", self.scene_path.display());
        Ok(())
    }
}

/// Map look arguments to catalog paths.
///
/// An argument naming a catalog entry resolves to that entry's path; anything
/// that looks like a file path is passed through for the planner to match.
pub fn look_paths(catalog: &LookCatalog, looks: &[String]) -> Result<Vec<String>, String> {
    looks
        .iter()
        .map(|look| {
            if let Some(entry) = catalog.get(look) {
                return Ok(entry.path().to_string());
            }
            if look.contains(['/', '\\']) || look.ends_with(".ass") {
                return Ok(normalize_separators(look));
            }
            Err(format!(
                "unknown look '{}', available: {}",
                look,
                catalog.names().collect::<Vec<_>>().join(", ")
            ))
        })
        .collect()
}
