use crate::error::Result;
use crate::look::{ApplyReport, AttachmentPlan, AttachmentPlanner, resolve_catalog};
use crate::profile::VariantProfile;
use crate::uv;
use lookloader_api::{AssetRef, LookCatalog, SceneBindingService, UvSource};
use std::path::Path;

/// A resolved standin: its asset, the catalog of its looks and, for the asset
/// variant, its geometry source candidates.
#[derive(Debug, Clone)]
pub struct LookStandin {
    asset: AssetRef,
    profile: VariantProfile,
    catalog: LookCatalog,
    uvs: UvSource,
}

impl LookStandin {
    /// Discover, classify and (when the variant tracks UVs) resolve geometry sources.
    pub fn resolve(
        root: &Path,
        asset: AssetRef,
        profile: VariantProfile,
        service: &dyn SceneBindingService,
    ) -> Result<Self> {
        let catalog = resolve_catalog(root, &asset, &profile, service)?;
        let uvs = if profile.resolves_uvs {
            uv::resolve_uvs(root, &asset.asset_name)
        } else {
            UvSource::default()
        };

        Ok(Self {
            asset,
            profile,
            catalog,
            uvs,
        })
    }

    pub fn asset(&self) -> &AssetRef {
        &self.asset
    }

    pub fn object_name(&self) -> &str {
        &self.asset.object_name
    }

    pub fn asset_name(&self) -> &str {
        &self.asset.asset_name
    }

    pub fn profile(&self) -> &VariantProfile {
        &self.profile
    }

    pub fn catalog(&self) -> &LookCatalog {
        &self.catalog
    }

    pub fn uvs(&self) -> &UvSource {
        &self.uvs
    }

    /// Re-run discovery and classification after bindings changed.
    pub fn refresh_looks(&mut self, root: &Path, service: &dyn SceneBindingService) -> Result<()> {
        self.catalog = resolve_catalog(root, &self.asset, &self.profile, service)?;
        Ok(())
    }

    pub fn refresh_uvs(&mut self, root: &Path) {
        if self.profile.resolves_uvs {
            self.uvs = uv::resolve_uvs(root, &self.asset.asset_name);
        }
    }

    pub fn is_looks_up_to_date(&self) -> bool {
        self.catalog.is_up_to_date()
    }

    /// Attach the looks at `requested` paths, then clear the host selection.
    ///
    /// The catalog of `self` is stale afterwards; call [`Self::refresh_looks`].
    pub fn attach_looks<S: AsRef<str>>(
        &self,
        requested: &[S],
        replace_mode: bool,
        service: &mut dyn SceneBindingService,
    ) -> Result<ApplyReport> {
        let plan = AttachmentPlanner::new(&self.catalog).plan(requested, replace_mode);
        self.run(plan, service)
    }

    /// Plug missing mandatory looks and bump lagging bindings to their latest version.
    pub fn update_existing_looks(
        &self,
        service: &mut dyn SceneBindingService,
    ) -> Result<ApplyReport> {
        let plan = AttachmentPlanner::new(&self.catalog).plan_update();
        self.run(plan, service)
    }

    fn run(
        &self,
        plan: AttachmentPlan,
        service: &mut dyn SceneBindingService,
    ) -> Result<ApplyReport> {
        let report = plan.apply(&self.asset, service)?;
        service.clear_selection();
        Ok(report)
    }

    /// Fur standins have no UVs and are always up to date.
    pub fn is_uv_up_to_date(&self, service: &dyn SceneBindingService) -> Result<bool> {
        if !self.profile.resolves_uvs {
            return Ok(true);
        }
        let live = service.get_source_path(self.asset.scene_handle)?;
        Ok(uv::is_up_to_date(&self.uvs, live.as_deref()))
    }

    pub fn update_uvs(&self, service: &mut dyn SceneBindingService) -> Result<bool> {
        if !self.profile.resolves_uvs {
            return Ok(false);
        }
        uv::update_source(&self.uvs, &self.asset, service)
    }
}
