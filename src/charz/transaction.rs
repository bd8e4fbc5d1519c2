use std::collections::HashMap;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::warn;
use crate::circuit::{SramArg, SramRequest, Word};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SramTransaction {
    Write { address: usize, word: Word },
    Read { address: usize },
}

impl SramTransaction {
    pub fn write(address: usize, word: Word) -> Self {
        Self::Write { address, word }
    }

    pub fn read(address: usize) -> Self {
        Self::Read { address }
    }

    pub fn address(&self) -> usize {
        match self {
            Self::Write { address, .. } | Self::Read { address } => *address,
        }
    }

    pub fn is_read(&self) -> bool {
        matches!(self, Self::Read { .. })
    }

    pub fn request(&self) -> SramRequest {
        match *self {
            Self::Write { address, word } => SramRequest::write(address, word),
            Self::Read { address } => SramRequest::read(address),
        }
    }
}

/// Builds a transaction sequence for an SRAM of geometry `sram` and tracks
/// the memory content it should hold after each transaction.
pub struct SramTransactionGenerator {
    pub sram: SramArg,

    transactions: Vec<SramTransaction>,
    expected: Vec<Option<Word>>,
    read_transaction_size: usize,
    write_transaction_size: usize,
    memory: HashMap<usize, Word>,
    rng: StdRng,
}

impl SramTransactionGenerator {
    pub fn new(sram: SramArg) -> Self {
        Self::with_rng(sram, StdRng::from_os_rng())
    }

    pub fn with_seed(sram: SramArg, seed: u64) -> Self {
        Self::with_rng(sram, StdRng::seed_from_u64(seed))
    }

    fn with_rng(sram: SramArg, rng: StdRng) -> Self {
        Self {
            sram,
            transactions: vec![],
            expected: vec![],
            read_transaction_size: 0,
            write_transaction_size: 0,
            memory: HashMap::new(),
            rng,
        }
    }

    pub fn add_random_write_transaction(&mut self) -> bool {
        let address = self.random_address();
        let word = self.random_word();
        self.add_write_transaction(address, word)
    }

    pub fn add_random_read_transaction(&mut self) -> bool {
        let address = self.random_address();
        self.add_read_transaction(address)
    }

    /// Add a write transaction, and update the expected memory state
    pub fn add_write_transaction(&mut self, address: usize, word: Word) -> bool {
        let address = self.sram.mask_address(address);
        let word = self.sram.mask_word(word);

        self.transactions.push(SramTransaction::write(address, word));
        self.expected.push(None);
        self.write_transaction_size += 1;
        self.memory.insert(address, word);

        true
    }

    /// Add a read transaction
    /// if address not written yet, return false
    pub fn add_read_transaction(&mut self, address: usize) -> bool {
        let address = self.sram.mask_address(address);

        let Some(&word) = self.memory.get(&address) else {
            warn!("try to read an unset address 0x{0:x}, this transaction will be ignored.", address);
            return false;
        };

        self.transactions.push(SramTransaction::read(address));
        self.expected.push(Some(word));
        self.read_transaction_size += 1;

        true
    }

    pub fn transactions(&self) -> &[SramTransaction] {
        &self.transactions
    }

    /// Transactions paired with the word each read must return.
    pub fn checked_transactions(&self) -> impl Iterator<Item = (&SramTransaction, Option<Word>)> + '_ {
        self.transactions.iter().zip(self.expected.iter().copied())
    }

    pub fn read_transaction_size(&self) -> usize {
        self.read_transaction_size
    }

    pub fn write_transaction_size(&self) -> usize {
        self.write_transaction_size
    }

    pub fn transaction_size(&self) -> usize {
        self.transactions.len()
    }

    pub fn memory(&self, address: usize) -> Option<Word> {
        self.memory.get(&address).copied()
    }

    #[inline]
    pub fn max_address(&self) -> usize {
        self.sram.max_address()
    }

    #[inline]
    pub fn max_word(&self) -> Word {
        self.sram.max_word()
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// generate an address in range [0, max_address]
    pub fn random_address(&mut self) -> usize {
        let max = self.max_address();
        self.rng.random_range(0..=max)
    }

    /// generate a word in range [0, max_word]
    pub fn random_word(&mut self) -> Word {
        let max = self.max_word();
        self.rng.random_range(0..=max)
    }
}
