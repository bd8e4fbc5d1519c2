mod base;
mod module;
mod error;

pub use base::*;
pub use module::*;
pub use error::*;
