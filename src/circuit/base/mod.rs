mod bits;
mod line;

pub use bits::*;
pub use line::*;
