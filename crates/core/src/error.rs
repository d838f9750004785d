use lookloader_api::SceneError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookError {
    #[error("Asset directory missing: {path}")]
    AssetDirectoryMissing { path: String },
    #[error("No default look found for asset {asset}")]
    NoDefaultLookFound { asset: String },
    #[error("Ambiguous override look for asset {asset}: {candidates:?}")]
    AmbiguousOverrideLook {
        asset: String,
        candidates: Vec<String>,
    },
    #[error("Unresolvable binding path: {0}")]
    UnresolvableBindingPath(String),
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LookError {
    /// Errors that only mark a standin as invalid instead of aborting the caller.
    pub fn invalidates_asset(&self) -> bool {
        matches!(
            self,
            LookError::AssetDirectoryMissing { .. } | LookError::NoDefaultLookFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, LookError>;
