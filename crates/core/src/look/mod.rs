//! Look resolution and reconciliation.
//!
//! ```text
//! ┌──────────────────┐   ┌────────────────────┐   ┌─────────────────────┐
//! │  LookDiscovery   │──▶│ BindingClassifier  │──▶│ AttachmentPlanner   │
//! │  (publish tree)  │   │ (live bindings)    │   │ (binding mutations) │
//! └──────────────────┘   └────────────────────┘   └─────────────────────┘
//! ```

pub mod classifier;
pub mod discovery;
pub mod planner;

pub use classifier::{BindingClassifier, Lineage, TailFamily};
pub use discovery::{DiscoveredLook, LookDiscovery};
pub use planner::{ApplyReport, AttachmentPlan, AttachmentPlanner, BindingOp};

use crate::error::Result;
use crate::profile::VariantProfile;
use lookloader_api::{AssetRef, LookCatalog, SceneBindingService};
use std::path::Path;

/// Discover the looks of `asset` and classify them against its live bindings.
pub fn resolve_catalog(
    root: &Path,
    asset: &AssetRef,
    profile: &VariantProfile,
    service: &dyn SceneBindingService,
) -> Result<LookCatalog> {
    let discovered = LookDiscovery::new(*profile).discover(root, &asset.asset_name)?;
    let bindings = service.list_bindings(asset.scene_handle)?;
    Ok(BindingClassifier::new(profile)?.classify(&discovered, &bindings))
}
