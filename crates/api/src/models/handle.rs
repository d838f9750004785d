use serde::{Deserialize, Serialize};
use std::fmt;

/// Host-owned identity of a standin in the scene.
///
/// The core never looks inside a handle; it only hands it back to the
/// [`SceneBindingService`](crate::SceneBindingService) and compares it for equality.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct SceneHandle(pub u64);

/// Host-owned identity of a live look binding (an include-graph node plugged
/// into one of the standin's operator slots).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct BindingHandle(pub u64);

impl fmt::Display for SceneHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "standin#{}", self.0)
    }
}

impl fmt::Display for BindingHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "binding#{}", self.0)
    }
}
