mod decoder;
mod columnmux;
mod writedriverarray;
mod controllogic;
mod bitcellarray;
mod prechargearray;
mod sram;

pub use decoder::*;
pub use columnmux::*;
pub use writedriverarray::*;
pub use controllogic::*;
pub use bitcellarray::*;
pub use prechargearray::*;
pub use sram::*;
