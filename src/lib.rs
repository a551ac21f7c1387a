pub mod cimi;
pub mod common;
pub mod config;
pub mod models;

pub use cimi::{CimiResource, CloudEntryPoint, Collision};
pub use common::{camel_to_snake, truncate_middle, Error, Result};
pub use crate::config::{CollisionPolicy, Config};
