mod error;
mod transaction;
pub mod function;

pub use error::*;
pub use transaction::*;
