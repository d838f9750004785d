use crate::models::{BindingHandle, SceneHandle};

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("Unknown standin: {0}")]
    UnknownAsset(SceneHandle),
    #[error("Unknown binding: {0}")]
    UnknownBinding(BindingHandle),
    #[error("Host error: {0}")]
    Host(String),
}

pub type SceneResult<T> = std::result::Result<T, SceneError>;
