mod entry_point;
mod resource;

pub use entry_point::CloudEntryPoint;
pub use resource::{CimiResource, Collision, RESERVED_NAMES};
