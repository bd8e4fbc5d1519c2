use derive_new::new;
use crate::circuit::{BitlinePair, LineState, SelectVector, Word};

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct WriteDriverArrayArg {
    pub select_size: usize,
    pub word_width: usize,
}

/// Differential write drivers, one per column.
///
/// A driver is live only when write is enabled and its word is selected; it
/// then forces `word[b]` onto the line and the complement onto the bar line.
/// Every other driver leaves both rails undriven.
#[derive(Debug, Clone)]
pub struct WriteDriverArray {
    pub args: WriteDriverArrayArg,
}

impl WriteDriverArray {
    pub fn new(args: WriteDriverArrayArg) -> Self {
        Self { args }
    }

    pub fn column_size(&self) -> usize {
        self.args.select_size * self.args.word_width
    }

    pub fn drive(&self, word: Word, select: &SelectVector, enable: bool) -> BitlinePair {
        debug_assert_eq!(select.len(), self.args.select_size);

        let mut pair = BitlinePair::undriven(self.column_size());
        if !enable {
            return pair;
        }

        for column in 0..self.column_size() {
            let word_index = column / self.args.word_width;
            let bit_index = column % self.args.word_width;
            if !select.is_selected(word_index) {
                continue;
            }
            let bit = ((word >> bit_index) & 0x1) != 0;
            pair.bitline.set(column, LineState::from_bit(bit));
            pair.bitline_bar.set(column, LineState::from_bit(!bit));
        }

        pair
    }
}
