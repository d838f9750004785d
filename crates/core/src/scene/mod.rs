pub mod memory;

pub use memory::{BindingRecord, InMemoryScene, StandinRecord};
