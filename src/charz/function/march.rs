use crate::circuit::Word;
use super::FunctionCharz;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarchOrder {
    Up,
    Down,
}

/// `R0`/`W0` use the all-zero background, `R1`/`W1` the all-one background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarchOp {
    R0,
    R1,
    W0,
    W1,
}

pub(crate) type MarchElement = (MarchOrder, &'static [MarchOp]);

/// Expand march elements over the whole address space.
pub(crate) fn generate_march(charz: &mut FunctionCharz, elements: &[MarchElement]) {
    let max_address = charz.transactions.max_address();
    let one = charz.transactions.max_word();
    let background = |bit: bool| -> Word { if bit { one } else { 0 } };

    for &(order, ops) in elements {
        let addresses: Box<dyn Iterator<Item = usize>> = match order {
            MarchOrder::Up => Box::new(0..=max_address),
            MarchOrder::Down => Box::new((0..=max_address).rev()),
        };

        for address in addresses {
            for op in ops {
                match op {
                    MarchOp::R0 | MarchOp::R1 => {
                        debug_assert_eq!(charz.transactions.memory(address), Some(background(*op == MarchOp::R1)));
                        charz.add_read_transaction(address);
                    }
                    MarchOp::W0 => charz.add_write_transaction(address, background(false)),
                    MarchOp::W1 => charz.add_write_transaction(address, background(true)),
                }
            }
        }
    }
}
