use super::handle::SceneHandle;
use serde::{Deserialize, Serialize};

/// A standin as the host reports it, before any classification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StandinObject {
    /// Name of the transform that owns the standin shape
    pub object_name: String,
    pub handle: SceneHandle,
    /// Geometry source the standin currently reads (`.abc` file), if any
    pub source_path: Option<String>,
}

/// One resolvable asset: the name used to build publish paths plus the host
/// handle of the standin it was resolved from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetRef {
    pub asset_name: String,
    pub object_name: String,
    pub scene_handle: SceneHandle,
}

impl AssetRef {
    pub fn new(
        asset_name: impl Into<String>,
        object_name: impl Into<String>,
        scene_handle: SceneHandle,
    ) -> Self {
        Self {
            asset_name: asset_name.into(),
            object_name: object_name.into(),
            scene_handle,
        }
    }

    /// Name given to a binding node created for `look_name` on this standin.
    pub fn binding_name(&self, look_name: &str) -> String {
        format!("aiIncludeGraph_{}_{}", self.object_name, look_name)
    }
}
