pub mod config;
pub mod error;
pub mod logging;
pub mod util;

pub mod look;
pub mod profile;
pub mod scene;
pub mod standin;
pub mod uv;

pub use config::LoaderConfig;
pub use error::{LookError, Result};
pub use profile::{VariantKind, VariantProfile};
pub use scene::InMemoryScene;
pub use standin::{LookStandin, StandinFactory};
