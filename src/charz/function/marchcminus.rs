use tracing::debug;
use crate::SramResult;
use super::{march::{generate_march, MarchElement, MarchOp::*, MarchOrder::*}, FunctionCharz, FunctionTestPolicy};

/// March C-: ⇕(w0); ⇑(r0, w1); ⇑(r1, w0); ⇓(r0, w1); ⇓(r1, w0); ⇕(r0)
///
/// Covers stuck-at, transition and unlinked coupling faults between any two
/// words, which includes crosstalk between words of the same row.
const MARCH_C_MINUS: [MarchElement; 6] = [
    (Up, &[W0]),
    (Up, &[R0, W1]),
    (Up, &[R1, W0]),
    (Down, &[R0, W1]),
    (Down, &[R1, W0]),
    (Up, &[R0]),
];

pub struct MarchCMinusPolicy;

impl FunctionTestPolicy for MarchCMinusPolicy {
    fn name(&self) -> &'static str {
        "march_c_minus"
    }

    fn generate_transactions(&self, charz: &mut FunctionCharz) -> SramResult<()> {
        debug!("generate transactions with march c- policy");
        generate_march(charz, &MARCH_C_MINUS);
        Ok(())
    }
}
