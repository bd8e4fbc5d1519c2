use sramctl::circuit::{
    AccessMode, BitcellArray, BitcellArrayArg, BitlinePair, BusConditioner, CircuitError, ControlState,
    LineState, PrechargeArray, Sram, SramArg, SramRequest, StorageArray, WideLine, OPERATION_CYCLES,
};
use tracing::Level;

fn init_log() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_test_writer()
        .try_init();
}

fn sram() -> Sram {
    init_log();
    Sram::new(SramArg::default()).unwrap()
}

#[test]
fn geometry() {
    let arg = SramArg::default();
    assert_eq!(arg.address_width(), 10);
    assert_eq!(arg.row_size(), 64);
    assert_eq!(arg.word_size(), 16);
    assert_eq!(arg.column_size(), 64);
    assert_eq!(arg.split_address(0x3FF), (0x3F, 0xF));
    assert_eq!(arg.split_address(0x123), (0x12, 0x3));

    assert!(SramArg::new(0, 4, 4).check().is_err());
    assert!(SramArg::new(6, 4, 0).check().is_err());
    assert!(SramArg::new(13, 4, 4).check().is_err());
    assert!(Sram::new(SramArg::new(6, 0, 4)).is_err());
}

#[test]
fn end_to_end() {
    let mut sram = sram();

    // write 0xA to 0x000
    let mut response = Default::default();
    for _ in 0..OPERATION_CYCLES {
        response = sram.cycle(&SramRequest::write(0x000, 0xA)).unwrap();
    }
    assert!(response.ready);
    assert_eq!(sram.read_word(0x000), 0xA);
    sram.idle().unwrap();

    // read it back
    for _ in 0..OPERATION_CYCLES {
        response = sram.cycle(&SramRequest::read(0x000)).unwrap();
    }
    assert!(response.ready);
    assert_eq!(response.word_out, 0xA);
    sram.idle().unwrap();

    // far corner, no crosstalk with 0x000
    sram.write(0x3FF, 0x5).unwrap();
    assert_eq!(sram.read(0x3FF).unwrap(), 0x5);
    assert_eq!(sram.read(0x000).unwrap(), 0xA);
    assert_eq!(sram.storage().set_bit_count(), 4);
}

#[test]
fn integration_sequence() {
    let mut sram = sram();
    let test_data = [(0x000, 0xA), (0x001, 0x5), (0x010, 0xC), (0x0FF, 0x3), (0x3FF, 0xF)];

    for &(address, word) in test_data.iter() {
        sram.write(address, word).unwrap();
    }
    for &(address, word) in test_data.iter() {
        assert_eq!(sram.read(address).unwrap(), word, "address 0x{:03x}", address);
    }

    // overwrite
    sram.write(0x000, 0x6).unwrap();
    assert_eq!(sram.read(0x000).unwrap(), 0x6);
    assert_eq!(sram.read(0x001).unwrap(), 0x5);
}

#[test]
fn ready_after_exactly_three_edges() {
    let mut sram = sram();
    assert!(sram.signals().ready);

    let request = SramRequest::read(0x12);
    assert!(!sram.cycle(&request).unwrap().ready);
    assert!(!sram.cycle(&request).unwrap().ready);
    assert!(sram.cycle(&request).unwrap().ready);
    assert_eq!(sram.state(), ControlState::Access);
}

#[test]
fn back_to_back() {
    let mut sram = sram();

    sram.issue(SramRequest::write(0x100, 0x9)).unwrap();
    assert_eq!(sram.state(), ControlState::Access);

    // next request straight from access, no idle cycle
    let request = SramRequest::read(0x100);
    sram.cycle(&request).unwrap();
    assert_eq!(sram.state(), ControlState::Precharge);
    sram.cycle(&request).unwrap();
    let response = sram.cycle(&request).unwrap();
    assert!(response.ready);
    assert_eq!(response.word_out, 0x9);
    assert_eq!(sram.cycles(), 2 * OPERATION_CYCLES);
}

#[test]
fn mode_latched_for_whole_operation() {
    let mut sram = sram();
    sram.write(0x2A, 0x3).unwrap();

    // start a read, then flip the request to a write of 0xF before access
    sram.cycle(&SramRequest::read(0x2A)).unwrap();
    sram.cycle(&SramRequest::write(0x2A, 0xF)).unwrap();
    let response = sram.cycle(&SramRequest::write(0x2A, 0xF)).unwrap();

    assert!(response.ready);
    assert_eq!(sram.latched_mode(), AccessMode::Read);
    assert_eq!(response.word_out, 0x3);
    assert_eq!(sram.read_word(0x2A), 0x3);
}

#[test]
fn write_then_flip_to_read_still_writes() {
    let mut sram = sram();
    let flipped = SramRequest::new(0x7, 0xC, true, AccessMode::Read);
    sram.cycle(&SramRequest::write(0x7, 0xC)).unwrap();
    sram.cycle(&flipped).unwrap();
    let response = sram.cycle(&flipped).unwrap();

    assert!(response.ready);
    assert_eq!(response.word_out, 0);
    assert_eq!(sram.read_word(0x7), 0xC);
}

#[test]
fn idle_holds_word_out() {
    let mut sram = sram();
    for _ in 0..4 {
        let response = sram.idle().unwrap();
        assert!(response.ready);
        assert_eq!(response.word_out, 0);
        assert_eq!(sram.state(), ControlState::Idle);
    }

    sram.write(0x55, 0xB).unwrap();
    sram.read(0x55).unwrap();
    for _ in 0..4 {
        let response = sram.idle().unwrap();
        assert!(response.ready);
        assert_eq!(response.word_out, 0xB);
    }

    // a write does not disturb the held word
    sram.write(0x56, 0x1).unwrap();
    assert_eq!(sram.word_out(), 0xB);
}

#[test]
fn disabled_idle_writes_nothing() {
    let mut sram = sram();
    for _ in 0..8 {
        sram.cycle(&SramRequest::new(0x3FF, 0xF, false, AccessMode::Write)).unwrap();
    }
    assert_eq!(sram.storage().set_bit_count(), 0);
}

#[test]
fn cancel_mid_operation_runs_to_completion() {
    let mut sram = sram();
    sram.cycle(&SramRequest::write(0x20, 0x7)).unwrap();
    sram.cycle(&SramRequest::idle()).unwrap();
    let response = sram.cycle(&SramRequest::new(0x20, 0x7, false, AccessMode::Write)).unwrap();
    assert!(response.ready);
    assert_eq!(sram.read_word(0x20), 0x7);
    sram.cycle(&SramRequest::idle()).unwrap();
    assert_eq!(sram.state(), ControlState::Idle);
}

#[test]
fn reset_clears_control_and_output() {
    let mut sram = sram();
    sram.write(0x10, 0xE).unwrap();
    sram.read(0x10).unwrap();
    sram.cycle(&SramRequest::write(0x10, 0x1)).unwrap();

    sram.reset();
    assert_eq!(sram.state(), ControlState::Idle);
    assert_eq!(sram.latched_mode(), AccessMode::Read);
    assert_eq!(sram.word_out(), 0);
    assert_eq!(sram.read_word(0x10), 0xE);
}

#[test]
fn issue_while_busy_fails() {
    let mut sram = sram();
    sram.cycle(&SramRequest::read(0)).unwrap();
    match sram.issue(SramRequest::read(0)) {
        Err(CircuitError::NotReady(state)) => assert_eq!(state, "PRECHARGE"),
        other => panic!("expect not ready, got {:?}", other),
    }
}

/// Conditioner that never releases the bus.
struct StuckPrecharge(usize);

impl BusConditioner for StuckPrecharge {
    fn condition(&self, _enable: bool) -> BitlinePair {
        BitlinePair {
            bitline: WideLine::filled(self.0, LineState::High),
            bitline_bar: WideLine::filled(self.0, LineState::High),
        }
    }
}

#[test]
fn bus_contention_detected() {
    init_log();
    let arg = SramArg::default();
    let storage = BitcellArray::new(BitcellArrayArg::new(arg.row_size(), arg.column_size()));
    let mut sram = Sram::with_collaborators(arg, storage, StuckPrecharge(arg.column_size())).unwrap();

    // column field 4 -> columns 16..20
    let request = SramRequest::write(0x004, 0x1);
    sram.cycle(&request).unwrap();
    sram.cycle(&request).unwrap();
    match sram.cycle(&request) {
        Err(CircuitError::BusContention { column }) => assert_eq!(column, 16),
        other => panic!("expect contention, got {:?}", other),
    }

    // the failed edge is not committed
    assert_eq!(sram.state(), ControlState::Develop);
    assert_eq!(sram.cycles(), 2);
    assert_eq!(sram.word_out(), 0);
    assert_eq!(sram.storage().set_bit_count(), 0);
    assert!(sram.cycle(&request).is_err());
    assert_eq!(sram.state(), ControlState::Develop);
}

#[test]
fn collaborator_size_mismatch() {
    let arg = SramArg::default();
    let storage = BitcellArray::new(BitcellArrayArg::new(32, arg.column_size()));
    assert!(Sram::with_collaborators(arg, storage, PrechargeArray::new(arg.column_size())).is_err());
}

/// Storage that only counts accesses with a selected row.
struct CountingStorage {
    columns: usize,
    selected: usize,
}

impl StorageArray for CountingStorage {
    fn row_size(&self) -> usize {
        64
    }

    fn column_size(&self) -> usize {
        self.columns
    }

    fn access(&mut self, row_select: &sramctl::circuit::SelectVector, _bitlines: &BitlinePair) -> Vec<bool> {
        if row_select.selected().is_some() {
            self.selected += 1;
        }
        vec![false; self.columns]
    }
}

#[test]
fn row_selected_only_in_develop_and_access() {
    let arg = SramArg::default();
    let storage = CountingStorage { columns: arg.column_size(), selected: 0 };
    let mut sram = Sram::with_collaborators(arg, storage, PrechargeArray::new(arg.column_size())).unwrap();

    sram.issue(SramRequest::read(0x3C)).unwrap();
    sram.idle().unwrap();
    sram.idle().unwrap();
    assert_eq!(sram.storage().selected, 2);
}
