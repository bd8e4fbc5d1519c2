mod random;
mod mats;
mod marchcminus;
mod march;
pub use random::*;
pub use mats::*;
pub use marchcminus::*;

use tracing::{debug, info, warn};
use crate::{circuit::{Sram, SramArg, SramRequest, Word, OPERATION_CYCLES}, SramResult};
use super::{CharzError, SramTransactionGenerator};

/// Functional test of the SRAM model: a policy generates transactions, the
/// transactions are issued through the boundary protocol, and every read is
/// checked against the expected memory content.
pub struct FunctionTest {
    pub sram: SramArg,
    pub policy: Box<dyn FunctionTestPolicy>,
    pub seed: Option<u64>,

    /// Issue the next operation straight from `Access` instead of returning
    /// to idle in between
    pub back_to_back: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FunctionTestResult {
    pub transaction_size: usize,
    pub read_size: usize,
    pub failed_size: usize,
    pub cycles: usize,
}

impl FunctionTestResult {
    pub fn passed(&self) -> bool {
        self.failed_size == 0
    }
}

impl FunctionTest {
    pub fn test(self) -> SramResult<FunctionTestResult> {
        // geometry is checked before any policy walks the address space
        let mut sram = Sram::new(self.sram)?;
        let mut charz = FunctionCharz::new(self.sram, self.seed);
        self.policy.generate_transactions(&mut charz)?;

        info!(
            "run {} transactions ({} read, {} write) with {}",
            charz.transactions.transaction_size(),
            charz.transactions.read_transaction_size(),
            charz.transactions.write_transaction_size(),
            self.policy.name(),
        );

        let mut result = FunctionTestResult {
            transaction_size: charz.transactions.transaction_size(),
            read_size: charz.transactions.read_transaction_size(),
            ..Default::default()
        };

        for (index, (transaction, expect)) in charz.transactions.checked_transactions().enumerate() {
            let request = transaction.request();
            let (word_out, in_time) = Self::run_operation(&mut sram, &request, index)?;
            if !in_time {
                warn!("transaction {} asserted ready before its last cycle", index);
                result.failed_size += 1;
            }

            if !self.back_to_back {
                let held = sram.idle()?.word_out;
                if held != word_out {
                    warn!("transaction {}: word_out changed on idle, 0x{:x} -> 0x{:x}", index, word_out, held);
                    result.failed_size += 1;
                }
            }

            if let Some(expect) = expect {
                if word_out != expect {
                    debug!("read 0x{:x} failed, expect 0x{:x}, got 0x{:x}", transaction.address(), expect, word_out);
                    result.failed_size += 1;
                }
            }
        }

        result.cycles = sram.cycles();
        if result.passed() {
            info!("functional test pass in all {} test", result.read_size);
        } else {
            warn!("functional test failed, {} failed in {} test", result.failed_size, result.read_size);
        }

        Ok(result)
    }

    /// Hold `request` for one operation. Returns the final `word_out` and
    /// whether `ready` stayed low until the last cycle.
    fn run_operation(sram: &mut Sram, request: &SramRequest, index: usize) -> SramResult<(Word, bool)> {
        let mut in_time = true;
        for _ in 1..OPERATION_CYCLES {
            in_time &= !sram.cycle(request)?.ready;
        }

        let response = sram.cycle(request)?;
        if !response.ready {
            return Err(CharzError::NotReadyAfterOperation { index, cycles: OPERATION_CYCLES }.into());
        }
        Ok((response.word_out, in_time))
    }
}

pub struct FunctionCharz {
    pub transactions: SramTransactionGenerator,
}

pub trait FunctionTestPolicy {
    fn name(&self) -> &'static str;
    fn generate_transactions(&self, charz: &mut FunctionCharz) -> SramResult<()>;
}

/// Look up a policy by its config name.
pub fn policy_by_name(name: &str) -> Result<Box<dyn FunctionTestPolicy>, CharzError> {
    match name {
        "random" => Ok(Box::new(RandomPolicy)),
        "mats" => Ok(Box::new(MatSPolicy)),
        "march_c_minus" => Ok(Box::new(MarchCMinusPolicy)),
        _ => Err(CharzError::UnsupportedPolicy(name.to_string())),
    }
}

impl FunctionCharz {
    pub fn new(sram: SramArg, seed: Option<u64>) -> Self {
        let transactions = match seed {
            Some(seed) => SramTransactionGenerator::with_seed(sram, seed),
            None => SramTransactionGenerator::new(sram),
        };
        Self { transactions }
    }

    pub fn generate_transactions(&mut self, policy: impl FunctionTestPolicy) -> SramResult<()> {
        policy.generate_transactions(self)
    }

    pub fn add_write_transaction(&mut self, address: usize, word: Word) {
        self.transactions.add_write_transaction(address, word);
    }

    pub fn add_read_transaction(&mut self, address: usize) {
        self.transactions.add_read_transaction(address);
    }
}

/// Default:
/// - policy: random
/// - back_to_back: false
pub struct FunctionTestBuilder {
    pub sram: Option<SramArg>,
    pub policy: Option<Box<dyn FunctionTestPolicy>>,
    pub seed: Option<u64>,
    pub back_to_back: bool,
}

impl Default for FunctionTestBuilder {
    fn default() -> Self {
        Self {
            sram: None,
            policy: Some(Box::new(RandomPolicy)),
            seed: None,
            back_to_back: false,
        }
    }
}

impl FunctionTestBuilder {
    pub fn sram(mut self, sram: impl Into<SramArg>) -> Self {
        self.sram = Some(sram.into());
        self
    }

    pub fn policy<T: FunctionTestPolicy + 'static>(mut self, policy: T) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    pub fn policy_box(mut self, policy: Box<dyn FunctionTestPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn back_to_back(mut self, back_to_back: bool) -> Self {
        self.back_to_back = back_to_back;
        self
    }

    pub fn build(self) -> Result<FunctionTest, CharzError> {
        Ok(FunctionTest {
            sram: self.sram.ok_or(CharzError::LackFunctionTestConfigField("sram"))?,
            policy: self.policy.ok_or(CharzError::LackFunctionTestConfigField("policy"))?,
            seed: self.seed,
            back_to_back: self.back_to_back,
        })
    }
}
