use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use crate::{check_arg, circuit::{full_bits_number, BitlinePair, CircuitError, CircuitResult, Word}};
use super::{
    AccessMode, BitcellArray, BitcellArrayArg, BusConditioner, ColumnMux, ColumnMuxArg,
    ControlLogic, ControlSignals, ControlState, Decoder, DecoderArg, PrechargeArray,
    StorageArray, WriteDriverArray, WriteDriverArrayArg, MAX_INPUT_SIZE, OPERATION_CYCLES,
};

const MAX_WORD_WIDTH: usize = 16;

/// Geometry of the macro. The address is split with the row field in the
/// high bits and the column (word within row) field in the low bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
#[serde(default)]
pub struct SramArg {
    pub row_address_width: usize,
    pub column_address_width: usize,
    pub word_width: usize,
}

impl Default for SramArg {
    fn default() -> Self {
        Self {
            row_address_width: 6,
            column_address_width: 4,
            word_width: 4,
        }
    }
}

impl SramArg {
    pub fn check(&self) -> CircuitResult<()> {
        check_arg!(self.row_address_width >= 1, "row address width must be at least 1");
        check_arg!(self.column_address_width >= 1, "column address width must be at least 1");
        check_arg!(self.row_address_width <= MAX_INPUT_SIZE, "row address width '{}' > {}", self.row_address_width, MAX_INPUT_SIZE);
        check_arg!(self.column_address_width <= MAX_INPUT_SIZE, "column address width '{}' > {}", self.column_address_width, MAX_INPUT_SIZE);
        check_arg!(self.word_width >= 1, "word width must be at least 1");
        check_arg!(self.word_width <= MAX_WORD_WIDTH, "word width '{}' > {}", self.word_width, MAX_WORD_WIDTH);
        Ok(())
    }

    pub fn address_width(&self) -> usize {
        self.row_address_width + self.column_address_width
    }

    /// Number of wordlines
    pub fn row_size(&self) -> usize {
        2usize.pow(self.row_address_width as u32)
    }

    /// Number of words sharing one row
    pub fn word_size(&self) -> usize {
        2usize.pow(self.column_address_width as u32)
    }

    /// Number of bitline pairs
    pub fn column_size(&self) -> usize {
        self.word_size() * self.word_width
    }

    pub fn max_address(&self) -> usize {
        full_bits_number(self.address_width())
    }

    pub fn max_word(&self) -> Word {
        full_bits_number(self.word_width)
    }

    #[inline]
    pub fn mask_address(&self, address: usize) -> usize {
        address & self.max_address()
    }

    #[inline]
    pub fn mask_word(&self, word: Word) -> Word {
        word & self.max_word()
    }

    /// `(row, column)` fields of `address`.
    pub fn split_address(&self, address: usize) -> (usize, usize) {
        let address = self.mask_address(address);
        let row = address >> self.column_address_width;
        let column = address & full_bits_number(self.column_address_width);
        (row, column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, new)]
pub struct SramRequest {
    pub address: usize,
    pub word: Word,
    pub enable: bool,
    pub mode: AccessMode,
}

impl SramRequest {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn read(address: usize) -> Self {
        Self::new(address, 0, true, AccessMode::Read)
    }

    pub fn write(address: usize, word: Word) -> Self {
        Self::new(address, word, true, AccessMode::Write)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SramResponse {
    pub word_out: Word,
    pub ready: bool,
}

/// The control plane of the macro and the collaborators it drives.
///
/// Each [`Sram::cycle`] is one clock edge followed by the combinational
/// settle of the new state:
///
/// ```text
///   address ─┬─ row field ──── row decoder ───────── row select ──┐
///            └─ column field ─ column decoder ─┬─ write driver ─┐ │
///                                              │   precharge ───┤ │
///                                              │                bus ─ storage
///                                              └─ column mux ◄── sensed ──┘
///                                                      │
///                                             read enable gate ─ data out latch
/// ```
///
/// Apart from the control logic, the only state is the data-out latch that
/// holds the last read word for the boundary.
pub struct Sram<S = BitcellArray, P = PrechargeArray> {
    pub args: SramArg,
    control: ControlLogic,
    row_decoder: Decoder,
    column_decoder: Decoder,
    column_mux: ColumnMux,
    write_driver: WriteDriverArray,
    storage: S,
    conditioner: P,
    data_output: Word,
    cycles: usize,
}

impl Sram<BitcellArray, PrechargeArray> {
    pub fn new(args: SramArg) -> CircuitResult<Self> {
        args.check()?;
        let storage = BitcellArray::new(BitcellArrayArg::new(args.row_size(), args.column_size()));
        let conditioner = PrechargeArray::new(args.column_size());
        Self::with_collaborators(args, storage, conditioner)
    }

    /// Stored word at `address`, read straight from the cells.
    pub fn read_word(&self, address: usize) -> Word {
        let (row, column) = self.args.split_address(address);
        (0..self.args.word_width).fold(0, |word, bit_index| {
            if self.storage.peek(row, column * self.args.word_width + bit_index) { word | (1 << bit_index) } else { word }
        })
    }
}

impl<S: StorageArray, P: BusConditioner> Sram<S, P> {
    pub fn with_collaborators(args: SramArg, storage: S, conditioner: P) -> CircuitResult<Self> {
        args.check()?;
        check_arg!(storage.row_size() == args.row_size(), "storage rows '{}' != {}", storage.row_size(), args.row_size());
        check_arg!(storage.column_size() == args.column_size(), "storage columns '{}' != {}", storage.column_size(), args.column_size());

        info!(
            "sram {} rows x {} columns, {} words of {} bits",
            args.row_size(), args.column_size(), args.max_address() + 1, args.word_width
        );

        Ok(Self {
            args,
            control: ControlLogic::new(),
            row_decoder: Decoder::new(DecoderArg::new(args.row_address_width))?,
            column_decoder: Decoder::new(DecoderArg::new(args.column_address_width))?,
            column_mux: ColumnMux::new(ColumnMuxArg::new(args.word_size(), args.word_width)),
            write_driver: WriteDriverArray::new(WriteDriverArrayArg::new(args.word_size(), args.word_width)),
            storage,
            conditioner,
            data_output: 0,
            cycles: 0,
        })
    }

    /// One clock edge with `request` sampled, then the combinational settle.
    ///
    /// The bus is resolved before the edge is committed. On error the control
    /// state, the cycle count, storage and `word_out` are all left unchanged.
    pub fn cycle(&mut self, request: &SramRequest) -> CircuitResult<SramResponse> {
        let mut control = self.control.clone();
        control.clock(request.enable, request.mode);

        let signals = control.signals();
        let word = self.evaluate(request, &signals)?;
        self.control = control;
        self.cycles += 1;
        if signals.read_enable {
            self.data_output = word;
        }

        debug!(
            "cycle {} {} addr=0x{:x} word_out=0x{:x} ready={}",
            self.cycles, self.control.state(), self.args.mask_address(request.address), self.data_output, signals.ready
        );

        Ok(SramResponse { word_out: self.data_output, ready: signals.ready })
    }

    fn evaluate(&mut self, request: &SramRequest, signals: &ControlSignals) -> CircuitResult<Word> {
        let (row, column) = self.args.split_address(request.address);
        let row_select = self.row_decoder.decode(row, signals.row_decode_enable);
        let column_select = self.column_decoder.decode(column, signals.column_decode_enable);

        let mut bitlines = BitlinePair::undriven(self.args.column_size());
        bitlines.overlay(&self.conditioner.condition(signals.precharge_enable))?;
        let drive = self.write_driver.drive(self.args.mask_word(request.word), &column_select, signals.write_enable);
        bitlines.overlay(&drive)?;

        let sensed = self.storage.access(&row_select, &bitlines);
        let word = self.column_mux.select(&sensed, &column_select);

        Ok(if signals.read_enable { word } else { 0 })
    }

    /// Run one complete operation: `OPERATION_CYCLES` edges with `request`
    /// held. Leaves the macro in `Access`, ready for a back-to-back request.
    pub fn issue(&mut self, request: SramRequest) -> CircuitResult<SramResponse> {
        if !self.control.signals().ready {
            return Err(CircuitError::NotReady(self.control.state().to_string()));
        }

        let request = SramRequest { enable: true, ..request };
        let mut response = SramResponse::default();
        for _ in 0..OPERATION_CYCLES {
            response = self.cycle(&request)?;
        }

        if !response.ready {
            return Err(CircuitError::NotReady(self.control.state().to_string()));
        }
        Ok(response)
    }

    pub fn idle(&mut self) -> CircuitResult<SramResponse> {
        self.cycle(&SramRequest::idle())
    }

    /// Write `word` to `address` and return to idle.
    pub fn write(&mut self, address: usize, word: Word) -> CircuitResult<()> {
        self.issue(SramRequest::write(address, word))?;
        self.idle()?;
        Ok(())
    }

    /// Read `address` and return to idle.
    pub fn read(&mut self, address: usize) -> CircuitResult<Word> {
        let response = self.issue(SramRequest::read(address))?;
        self.idle()?;
        Ok(response.word_out)
    }

    pub fn reset(&mut self) {
        self.control.reset();
        self.data_output = 0;
    }

    pub fn state(&self) -> ControlState {
        self.control.state()
    }

    pub fn latched_mode(&self) -> AccessMode {
        self.control.latched_mode()
    }

    pub fn signals(&self) -> ControlSignals {
        self.control.signals()
    }

    pub fn word_out(&self) -> Word {
        self.data_output
    }

    pub fn cycles(&self) -> usize {
        self.cycles
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
