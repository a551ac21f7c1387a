mod error;
mod strings;

pub use error::*;
pub use strings::*;
