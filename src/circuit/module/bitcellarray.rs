use derive_new::new;
use tracing::trace;
use crate::circuit::{BitlinePair, Bits, SelectVector};

/// Storage behind the shared bus.
///
/// Implementors must apply a write only to the selected row, and return the
/// selected row's contents as seen by the sense amplifiers once any write of
/// this cycle has landed.
pub trait StorageArray {
    fn row_size(&self) -> usize;
    fn column_size(&self) -> usize;
    fn access(&mut self, row_select: &SelectVector, bitlines: &BitlinePair) -> Bits;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct BitcellArrayArg {
    pub row_size: usize,
    pub column_size: usize,
}

/// Behavioral 6T array: a cell flips only when its row is selected and its
/// column pair is driven differentially.
#[derive(Debug, Clone)]
pub struct BitcellArray {
    pub args: BitcellArrayArg,
    cells: Vec<Bits>,
}

impl BitcellArray {
    pub fn new(args: BitcellArrayArg) -> Self {
        Self {
            args,
            cells: vec![vec![false; args.column_size]; args.row_size],
        }
    }

    pub fn peek(&self, row: usize, column: usize) -> bool {
        self.cells[row][column]
    }

    pub fn row(&self, row: usize) -> &[bool] {
        &self.cells[row]
    }

    /// Number of cells holding a one.
    pub fn set_bit_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&b| b).count()
    }
}

impl StorageArray for BitcellArray {
    fn row_size(&self) -> usize {
        self.args.row_size
    }

    fn column_size(&self) -> usize {
        self.args.column_size
    }

    fn access(&mut self, row_select: &SelectVector, bitlines: &BitlinePair) -> Bits {
        let Some(row) = row_select.selected() else {
            return vec![false; self.args.column_size];
        };

        let cells = &mut self.cells[row];
        for (column, cell) in cells.iter_mut().enumerate() {
            if let Some(bit) = bitlines.differential(column) {
                trace!("cell[{}][{}] <- {}", row, column, bit);
                *cell = bit;
            }
        }

        cells.clone()
    }
}
