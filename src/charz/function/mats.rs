use tracing::debug;
use crate::SramResult;
use super::{march::{generate_march, MarchElement, MarchOp::*, MarchOrder::*}, FunctionCharz, FunctionTestPolicy};

/// MATS+: ⇕(w0); ⇑(r0, w1); ⇓(r1)
const MATS_PLUS: [MarchElement; 3] = [
    (Up, &[W0]),
    (Up, &[R0, W1]),
    (Down, &[R1]),
];

pub struct MatSPolicy;

impl FunctionTestPolicy for MatSPolicy {
    fn name(&self) -> &'static str {
        "mats"
    }

    fn generate_transactions(&self, charz: &mut FunctionCharz) -> SramResult<()> {
        debug!("generate transactions with mats+ policy");
        generate_march(charz, &MATS_PLUS);
        Ok(())
    }
}
