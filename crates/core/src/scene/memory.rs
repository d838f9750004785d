//! In-memory scene implementing both host collaborator traits.
//!
//! Standins own numbered operator slots; a slot is either free or holds one
//! binding. The whole scene serializes to a JSON document so that a scene can
//! be captured, edited offline and replayed.

use crate::error::Result;
use indexmap::IndexMap;
use lookloader_api::{
    BindingHandle, SceneBindingService, SceneError, SceneHandle, SceneResult, SelectionProvider,
    StandinObject,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BindingRecord {
    pub handle: BindingHandle,
    pub name: String,
    pub path: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StandinRecord {
    pub object_name: String,
    pub handle: SceneHandle,
    #[serde(default)]
    pub source_path: Option<String>,
    #[serde(default)]
    pub slots: Vec<Option<BindingRecord>>,
}

impl StandinRecord {
    pub fn to_object(&self) -> StandinObject {
        StandinObject {
            object_name: self.object_name.clone(),
            handle: self.handle,
            source_path: self.source_path.clone(),
        }
    }

    pub fn bindings(&self) -> impl Iterator<Item = &BindingRecord> {
        self.slots.iter().flatten()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryScene {
    #[serde(default)]
    standins: Vec<StandinRecord>,
    #[serde(default)]
    selection: Vec<SceneHandle>,
    #[serde(default)]
    next_id: u64,
}

impl InMemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Register a standin and return its handle.
    pub fn add_standin(
        &mut self,
        object_name: impl Into<String>,
        source_path: Option<&str>,
    ) -> SceneHandle {
        let handle = SceneHandle(self.allocate_id());
        self.standins.push(StandinRecord {
            object_name: object_name.into(),
            handle,
            source_path: source_path.map(str::to_string),
            slots: Vec::new(),
        });
        handle
    }

    pub fn standins(&self) -> &[StandinRecord] {
        &self.standins
    }

    pub fn standin(&self, handle: SceneHandle) -> Option<&StandinRecord> {
        self.standins.iter().find(|s| s.handle == handle)
    }

    pub fn find_standin(&self, object_name: &str) -> Option<&StandinRecord> {
        self.standins.iter().find(|s| s.object_name == object_name)
    }

    pub fn binding(&self, handle: BindingHandle) -> Option<&BindingRecord> {
        self.standins
            .iter()
            .flat_map(|s| s.bindings())
            .find(|b| b.handle == handle)
    }

    pub fn select(&mut self, handle: SceneHandle) {
        if !self.selection.contains(&handle) {
            self.selection.push(handle);
        }
    }

    pub fn selection(&self) -> &[SceneHandle] {
        &self.selection
    }

    /// Handles come from one counter shared by standins and bindings and never
    /// collide with ids already present in a loaded document.
    fn allocate_id(&mut self) -> u64 {
        let used = self
            .standins
            .iter()
            .flat_map(|s| std::iter::once(s.handle.0).chain(s.bindings().map(|b| b.handle.0)))
            .max()
            .map_or(0, |max| max + 1);
        let id = self.next_id.max(used);
        self.next_id = id + 1;
        id
    }

    fn standin_mut(&mut self, handle: SceneHandle) -> SceneResult<&mut StandinRecord> {
        self.standins
            .iter_mut()
            .find(|s| s.handle == handle)
            .ok_or(SceneError::UnknownAsset(handle))
    }

    fn binding_mut(&mut self, handle: BindingHandle) -> SceneResult<&mut BindingRecord> {
        self.standins
            .iter_mut()
            .flat_map(|s| s.slots.iter_mut().flatten())
            .find(|b| b.handle == handle)
            .ok_or(SceneError::UnknownBinding(handle))
    }

    fn standin_ref(&self, handle: SceneHandle) -> SceneResult<&StandinRecord> {
        self.standin(handle).ok_or(SceneError::UnknownAsset(handle))
    }
}

impl SceneBindingService for InMemoryScene {
    fn list_bindings(&self, asset: SceneHandle) -> SceneResult<IndexMap<String, BindingHandle>> {
        Ok(self
            .standin_ref(asset)?
            .bindings()
            .map(|b| (b.path.clone(), b.handle))
            .collect())
    }

    fn binding_slots(&self, asset: SceneHandle) -> SceneResult<Vec<Option<BindingHandle>>> {
        Ok(self
            .standin_ref(asset)?
            .slots
            .iter()
            .map(|slot| slot.as_ref().map(|b| b.handle))
            .collect())
    }

    fn create_binding(
        &mut self,
        asset: SceneHandle,
        name: &str,
        path: &str,
    ) -> SceneResult<BindingHandle> {
        // Fail on an unknown standin before consuming an id
        self.standin_ref(asset)?;
        let handle = BindingHandle(self.allocate_id());
        let record = BindingRecord {
            handle,
            name: name.to_string(),
            path: path.to_string(),
        };

        let standin = self.standin_mut(asset)?;
        match standin.slots.iter().position(Option::is_none) {
            Some(index) => standin.slots[index] = Some(record),
            None => standin.slots.push(Some(record)),
        }
        Ok(handle)
    }

    fn retarget_binding(&mut self, binding: BindingHandle, path: &str) -> SceneResult<()> {
        self.binding_mut(binding)?.path = path.to_string();
        Ok(())
    }

    fn rename_binding(&mut self, binding: BindingHandle, name: &str) -> SceneResult<()> {
        self.binding_mut(binding)?.name = name.to_string();
        Ok(())
    }

    fn disconnect_binding(&mut self, asset: SceneHandle, binding: BindingHandle) -> SceneResult<()> {
        let standin = self.standin_mut(asset)?;
        let slot = standin
            .slots
            .iter_mut()
            .find(|slot| matches!(slot, Some(b) if b.handle == binding))
            .ok_or(SceneError::UnknownBinding(binding))?;
        *slot = None;
        Ok(())
    }

    fn get_source_path(&self, asset: SceneHandle) -> SceneResult<Option<String>> {
        Ok(self.standin_ref(asset)?.source_path.clone())
    }

    fn set_source_path(&mut self, asset: SceneHandle, path: &str) -> SceneResult<()> {
        self.standin_mut(asset)?.source_path = Some(path.to_string());
        Ok(())
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
    }
}

impl SelectionProvider for InMemoryScene {
    fn selected_standins(&self) -> Vec<StandinObject> {
        self.selection
            .iter()
            .filter_map(|handle| self.standin(*handle))
            .map(StandinRecord::to_object)
            .collect()
    }

    fn all_standins(&self) -> Vec<StandinObject> {
        self.standins.iter().map(StandinRecord::to_object).collect()
    }
}
