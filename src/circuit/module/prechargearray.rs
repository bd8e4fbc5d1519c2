use crate::circuit::{BitlinePair, LineState, WideLine};

/// Circuit that returns the shared bus to its neutral level between
/// operations.
pub trait BusConditioner {
    fn condition(&self, enable: bool) -> BitlinePair;
}

/// Precharge/equalize devices pulling both rails of every column high.
#[derive(Debug, Clone)]
pub struct PrechargeArray {
    pub column_size: usize,
}

impl PrechargeArray {
    pub fn new(column_size: usize) -> Self {
        Self { column_size }
    }
}

impl BusConditioner for PrechargeArray {
    fn condition(&self, enable: bool) -> BitlinePair {
        if !enable {
            return BitlinePair::undriven(self.column_size);
        }
        BitlinePair {
            bitline: WideLine::filled(self.column_size, LineState::High),
            bitline_bar: WideLine::filled(self.column_size, LineState::High),
        }
    }
}
