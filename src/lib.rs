pub mod circuit;
pub mod charz;
pub mod error;
pub use error::*;
