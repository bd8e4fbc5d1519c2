use sramctl::circuit::{LineState, SelectVector, WriteDriverArray, WriteDriverArrayArg};

const SELECT_SIZE: usize = 16;
const WORD_WIDTH: usize = 4;
const COLUMN_SIZE: usize = SELECT_SIZE * WORD_WIDTH;

fn driver() -> WriteDriverArray {
    WriteDriverArray::new(WriteDriverArrayArg::new(SELECT_SIZE, WORD_WIDTH))
}

#[test]
fn write_disabled_is_undriven() {
    let pair = driver().drive(0xA, &SelectVector::one_hot(SELECT_SIZE, 0), false);
    assert_eq!(pair.column_size(), COLUMN_SIZE);
    assert!(pair.bitline.is_all_undriven());
    assert!(pair.bitline_bar.is_all_undriven());
}

#[test]
fn write_driver_simple() {
    let driver = driver();

    // 0xA = 1010 -> cols 0..4 carry 0, 1, 0, 1
    let pair = driver.drive(0xA, &SelectVector::one_hot(SELECT_SIZE, 0), true);
    let expect = [LineState::Low, LineState::High, LineState::Low, LineState::High];
    for (column, &state) in expect.iter().enumerate() {
        assert_eq!(pair.bitline.get(column), state, "BL[{}]", column);
    }
    let expect_bar = [LineState::High, LineState::Low, LineState::High, LineState::Low];
    for (column, &state) in expect_bar.iter().enumerate() {
        assert_eq!(pair.bitline_bar.get(column), state, "BR[{}]", column);
    }

    // 0xC to word 5 -> cols 20..24 carry 0, 0, 1, 1
    let pair = driver.drive(0xC, &SelectVector::one_hot(SELECT_SIZE, 5), true);
    assert_eq!(pair.bitline.get(20), LineState::Low);
    assert_eq!(pair.bitline.get(21), LineState::Low);
    assert_eq!(pair.bitline.get(22), LineState::High);
    assert_eq!(pair.bitline.get(23), LineState::High);
    assert_eq!(pair.bitline.driven_count(), WORD_WIDTH);

    // 0xF to the last word
    let pair = driver.drive(0xF, &SelectVector::one_hot(SELECT_SIZE, 15), true);
    for column in 60..64 {
        assert_eq!(pair.bitline.get(column), LineState::High);
        assert_eq!(pair.bitline_bar.get(column), LineState::Low);
    }
}

#[test]
fn write_driver_differential() {
    let driver = driver();
    for word_index in 0..SELECT_SIZE {
        for word in 0..(1 << WORD_WIDTH) {
            let pair = driver.drive(word, &SelectVector::one_hot(SELECT_SIZE, word_index), true);
            for column in 0..COLUMN_SIZE {
                let bl = pair.bitline.get(column);
                let br = pair.bitline_bar.get(column);
                if column / WORD_WIDTH == word_index {
                    let bit = (word >> (column % WORD_WIDTH)) & 0x1 != 0;
                    assert_eq!(bl, LineState::from_bit(bit));
                    assert_eq!(br.bit(), bl.bit().map(|b| !b));
                } else {
                    assert_eq!(bl, LineState::Undriven, "column {}", column);
                    assert_eq!(br, LineState::Undriven, "column {}", column);
                }
            }
        }
    }
}

#[test]
fn no_word_selected_is_undriven() {
    let pair = driver().drive(0xF, &SelectVector::none(SELECT_SIZE), true);
    assert!(pair.bitline.is_all_undriven());
    assert!(pair.bitline_bar.is_all_undriven());
}
