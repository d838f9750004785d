pub mod error;
pub mod models;
pub mod scene;

// Re-export commonly used types
pub use error::{SceneError, SceneResult};
pub use models::*;
pub use scene::{SceneBindingService, SelectionProvider};
