use std::collections::HashSet;
use rand::Rng;
use tracing::debug;
use crate::SramResult;
use super::{FunctionCharz, FunctionTestPolicy};

/// Words of address space per tracked address
const ADDRESS_SPARSITY: usize = 64;

pub struct RandomPolicy;

impl FunctionTestPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    /*
        1. Pick N distinct addresses.
        2. Write an initial word to each, reading it back right after the write.
        3. Mix random reads and writes. Reads only target the N addresses;
           writes may land anywhere.
        Stop once at least 4 * N reads have been generated.
    */
    fn generate_transactions(&self, charz: &mut FunctionCharz) -> SramResult<()> {
        debug!("generate transactions with random policy");
        let address_size = 1.max((charz.transactions.max_address() + 1) / ADDRESS_SPARSITY);
        let addresses = self.generate_random_address(charz, address_size);

        for &address in addresses.iter() {
            let word = charz.transactions.random_word();
            charz.add_write_transaction(address, word);
            charz.add_read_transaction(address);
        }

        let target_size = 4 * address_size;
        while charz.transactions.read_transaction_size() < target_size {
            let is_write: bool = charz.transactions.rng().random_bool(0.5);
            if is_write {
                let address = charz.transactions.random_address();
                let word = charz.transactions.random_word();
                charz.add_write_transaction(address, word);
            } else {
                let address_index = charz.transactions.rng().random_range(0..addresses.len());
                charz.add_read_transaction(addresses[address_index]);
            }
        }

        Ok(())
    }
}

impl RandomPolicy {
    fn generate_random_address(&self, charz: &mut FunctionCharz, address_size: usize) -> Vec<usize> {
        let mut address_set = HashSet::new();
        let mut addresses = vec![];
        while address_set.len() < address_size {
            let address = charz.transactions.random_address();
            if address_set.insert(address) {
                addresses.push(address);
            }
        }
        addresses
    }
}
