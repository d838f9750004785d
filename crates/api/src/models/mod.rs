pub mod asset;
pub mod handle;
pub mod look;
pub mod uv;

pub use asset::*;
pub use handle::*;
pub use look::*;
pub use uv::*;
