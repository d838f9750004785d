pub mod factory;
pub mod look_standin;

pub use factory::{StandinFactory, identify};
pub use look_standin::LookStandin;
