//! Host collaborator traits.
//!
//! The core never talks to a scene graph directly. Everything it needs from
//! the host goes through these two traits:
//! - [`SceneBindingService`] reads and mutates the look bindings of a standin
//! - [`SelectionProvider`] reports which standins the user is working on

use crate::error::SceneResult;
use crate::models::{BindingHandle, SceneHandle, StandinObject};
use indexmap::IndexMap;

/// Live binding graph of the host.
///
/// Mutating methods take `&mut self`: a discovery → plan → execute cycle holds
/// the service exclusively, so bindings cannot change between classification
/// and execution.
pub trait SceneBindingService {
    /// Live bindings of a standin, keyed by bound file path, in slot order.
    fn list_bindings(&self, asset: SceneHandle) -> SceneResult<IndexMap<String, BindingHandle>>;

    /// Occupant of every operator slot from index 0, `None` for a free slot.
    fn binding_slots(&self, asset: SceneHandle) -> SceneResult<Vec<Option<BindingHandle>>>;

    /// Create a binding targeting `path` and plug it into the first free slot.
    fn create_binding(
        &mut self,
        asset: SceneHandle,
        name: &str,
        path: &str,
    ) -> SceneResult<BindingHandle>;

    /// Point an existing binding at another file, keeping its slot and identity.
    fn retarget_binding(&mut self, binding: BindingHandle, path: &str) -> SceneResult<()>;

    fn rename_binding(&mut self, binding: BindingHandle, name: &str) -> SceneResult<()>;

    /// Unplug a binding from the standin's operator slots.
    fn disconnect_binding(&mut self, asset: SceneHandle, binding: BindingHandle) -> SceneResult<()>;

    /// Geometry source file the standin reads, if it has one.
    fn get_source_path(&self, asset: SceneHandle) -> SceneResult<Option<String>>;

    fn set_source_path(&mut self, asset: SceneHandle, path: &str) -> SceneResult<()>;

    fn clear_selection(&mut self);
}

/// Supplies the standins the resolution pass should consider.
pub trait SelectionProvider {
    /// Standins reachable from the current host selection (may be empty).
    fn selected_standins(&self) -> Vec<StandinObject>;

    /// Every standin known to the host.
    fn all_standins(&self) -> Vec<StandinObject>;
}
