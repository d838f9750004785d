//! Attachment planner.
//!
//! Turns an "attach these looks" request into binding mutations. Planning is
//! pure and works on a catalog snapshot; [`AttachmentPlan::apply`] then pushes
//! the mutations through the [`SceneBindingService`]. The catalog is stale
//! afterwards and must be resolved again by the caller.

use crate::error::Result;
use lookloader_api::{AssetRef, BindingHandle, LookCatalog, PlugState, SceneBindingService};
use std::collections::HashSet;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingOp {
    /// New binding for `look` in the first free slot
    Create { look: String, path: String },
    /// Point an existing binding at another file, same slot, same identity
    Retarget { binding: BindingHandle, path: String },
    /// Rename an existing binding after `look`
    Rename { binding: BindingHandle, look: String },
    /// Disconnect these bindings, scanning slots from index 0
    Unbind { bindings: Vec<BindingHandle> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentPlan {
    ops: Vec<BindingOp>,
}

/// What an applied plan changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub created: Vec<BindingHandle>,
    pub retargeted: usize,
    pub renamed: usize,
    pub disconnected: usize,
}

impl ApplyReport {
    pub fn is_noop(&self) -> bool {
        self.created.is_empty() && self.retargeted == 0 && self.renamed == 0 && self.disconnected == 0
    }
}

pub struct AttachmentPlanner<'a> {
    catalog: &'a LookCatalog,
}

impl<'a> AttachmentPlanner<'a> {
    pub fn new(catalog: &'a LookCatalog) -> Self {
        Self { catalog }
    }

    /// Plan the attachment of `requested` look paths, in the given order.
    ///
    /// In replace mode only the first requested path that belongs to the
    /// catalog is acted upon and every later request is dropped: replacing
    /// means picking one look. Paths unknown to the catalog are skipped.
    ///
    /// A replace leaves at most one binding per lineage: every other binding
    /// recorded on the catalog, duplicates of the kept lineage included, is
    /// unbound.
    pub fn plan<S: AsRef<str>>(&self, requested: &[S], replace_mode: bool) -> AttachmentPlan {
        let mut plan = AttachmentPlan::default();
        let mut seen = HashSet::new();

        for path in requested.iter().map(AsRef::as_ref) {
            if !seen.insert(path) {
                continue;
            }
            let Some(entry) = self.catalog.find_by_path(path) else {
                warn!("Requested look {} is not part of the catalog, skipping", path);
                continue;
            };

            match (entry.plug_state(), entry.binding_ref()) {
                (PlugState::AlreadyPlugged, Some(binding)) => {
                    if replace_mode {
                        plan.push_unbind(self.bound_except(binding));
                    } else {
                        debug!("Look {} already plugged", entry.name());
                    }
                }
                (PlugState::AnteriorVersionPlugged, Some(binding)) => {
                    plan.ops.push(BindingOp::Retarget {
                        binding,
                        path: path.to_string(),
                    });
                    if replace_mode {
                        plan.push_unbind(
                            entry
                                .lineage_bindings()
                                .iter()
                                .copied()
                                .filter(|other| *other != binding)
                                .collect(),
                        );
                    }
                }
                _ => match self.first_bound().filter(|_| replace_mode) {
                    Some(replaced) => {
                        plan.ops.push(BindingOp::Retarget {
                            binding: replaced,
                            path: path.to_string(),
                        });
                        plan.ops.push(BindingOp::Rename {
                            binding: replaced,
                            look: entry.name().to_string(),
                        });
                        plan.push_unbind(self.bound_except(replaced));
                    }
                    None => plan.ops.push(BindingOp::Create {
                        look: entry.name().to_string(),
                        path: path.to_string(),
                    }),
                },
            }

            if replace_mode {
                break;
            }
        }

        plan
    }

    /// Plug the mandatory looks that are missing and move every lagging
    /// binding to its latest version.
    pub fn plan_update(&self) -> AttachmentPlan {
        let mut plan = AttachmentPlan::default();

        for entry in self.catalog.entries() {
            match (entry.plug_state(), entry.binding_ref()) {
                (PlugState::NotPlugged, _) if entry.is_mandatory() => {
                    plan.ops.push(BindingOp::Create {
                        look: entry.name().to_string(),
                        path: entry.path().to_string(),
                    });
                }
                (PlugState::AnteriorVersionPlugged, Some(binding)) => {
                    plan.ops.push(BindingOp::Retarget {
                        binding,
                        path: entry.path().to_string(),
                    });
                }
                _ => {}
            }
        }

        plan
    }

    fn first_bound(&self) -> Option<BindingHandle> {
        self.catalog
            .bound_entries()
            .find_map(|entry| entry.binding_ref())
    }

    /// Distinct bindings of the catalog other than `keep`, in catalog order.
    ///
    /// Every binding of a lineage counts, not only the one an entry refers to.
    fn bound_except(&self, keep: BindingHandle) -> Vec<BindingHandle> {
        let mut bindings = Vec::new();
        for entry in self.catalog.bound_entries() {
            for &binding in entry.lineage_bindings() {
                if binding != keep && !bindings.contains(&binding) {
                    bindings.push(binding);
                }
            }
        }
        bindings
    }
}

impl AttachmentPlan {
    pub fn ops(&self) -> &[BindingOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    fn push_unbind(&mut self, bindings: Vec<BindingHandle>) {
        if !bindings.is_empty() {
            self.ops.push(BindingOp::Unbind { bindings });
        }
    }

    /// Execute the plan against the host, in plan order.
    pub fn apply(
        &self,
        asset: &AssetRef,
        service: &mut dyn SceneBindingService,
    ) -> Result<ApplyReport> {
        let mut report = ApplyReport::default();

        for op in &self.ops {
            match op {
                BindingOp::Create { look, path } => {
                    let name = asset.binding_name(look);
                    let binding = service.create_binding(asset.scene_handle, &name, path)?;
                    info!("Plugged {} ({}) into {}", name, path, asset.object_name);
                    report.created.push(binding);
                }
                BindingOp::Retarget { binding, path } => {
                    service.retarget_binding(*binding, path)?;
                    info!("Retargeted {} to {}", binding, path);
                    report.retargeted += 1;
                }
                BindingOp::Rename { binding, look } => {
                    service.rename_binding(*binding, &asset.binding_name(look))?;
                    report.renamed += 1;
                }
                BindingOp::Unbind { bindings } => {
                    report.disconnected += unbind_by_slot(asset, bindings, service)?;
                }
            }
        }

        Ok(report)
    }
}

/// Walk the operator slots from index 0 and disconnect every occupant listed
/// in `bindings`, stopping as soon as all of them are gone.
fn unbind_by_slot(
    asset: &AssetRef,
    bindings: &[BindingHandle],
    service: &mut dyn SceneBindingService,
) -> Result<usize> {
    let mut remaining: HashSet<BindingHandle> = bindings.iter().copied().collect();
    let mut disconnected = 0;

    for (index, occupant) in service
        .binding_slots(asset.scene_handle)?
        .into_iter()
        .enumerate()
    {
        if remaining.is_empty() {
            break;
        }
        let Some(binding) = occupant else {
            continue;
        };
        if remaining.remove(&binding) {
            service.disconnect_binding(asset.scene_handle, binding)?;
            debug!("Disconnected {} from slot {} of {}", binding, index, asset.object_name);
            disconnected += 1;
        }
    }

    if !remaining.is_empty() {
        warn!(
            "{} binding(s) to unplug were not found in the slots of {}",
            remaining.len(),
            asset.object_name
        );
    }

    Ok(disconnected)
}
