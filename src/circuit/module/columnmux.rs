use derive_new::new;
use crate::circuit::{SelectVector, Word};

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct ColumnMuxArg {
    /// Number of words sharing one row
    pub select_size: usize,
    /// Bits per word
    pub word_width: usize,
}

/// Read-side column multiplexer.
///
/// Column `c` belongs to word `c / word_width` and feeds output bit
/// `c % word_width`, so output bit `b` is the OR over the columns
/// `b, b + word_width, b + 2 * word_width, ...`, each masked by the select
/// line of its word. `select` must come from a decoder: with a one-hot select
/// at most one term per bit is live and the OR is a 1-of-N multiplexer.
#[derive(Debug, Clone)]
pub struct ColumnMux {
    pub args: ColumnMuxArg,
}

impl ColumnMux {
    pub fn new(args: ColumnMuxArg) -> Self {
        Self { args }
    }

    pub fn column_size(&self) -> usize {
        self.args.select_size * self.args.word_width
    }

    pub fn select(&self, sensed: &[bool], select: &SelectVector) -> Word {
        debug_assert_eq!(sensed.len(), self.column_size());
        debug_assert_eq!(select.len(), self.args.select_size);

        let word_width = self.args.word_width;
        (0..word_width).fold(0, |word, bit_index| {
            let bit = (0..self.args.select_size)
                .any(|sel_index| select.is_selected(sel_index) && sensed[sel_index * word_width + bit_index]);
            if bit { word | (1 << bit_index) } else { word }
        })
    }
}
