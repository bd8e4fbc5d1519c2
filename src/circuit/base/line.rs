use std::fmt;
use itertools::Itertools;
use crate::circuit::{CircuitError, CircuitResult};

/// Value carried by one position of a shared line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineState {
    High,
    Low,
    /// Not asserted by any driver this cycle.
    #[default]
    Undriven,
}

impl LineState {
    pub fn from_bit(bit: bool) -> Self {
        if bit { Self::High } else { Self::Low }
    }

    pub fn is_driven(&self) -> bool {
        !matches!(self, Self::Undriven)
    }

    /// Logic value, `None` when undriven.
    pub fn bit(&self) -> Option<bool> {
        match self {
            Self::High => Some(true),
            Self::Low => Some(false),
            Self::Undriven => None,
        }
    }

    fn symbol(&self) -> char {
        match self {
            Self::High => '1',
            Self::Low => '0',
            Self::Undriven => 'z',
        }
    }
}

/// One rail of the shared differential bus, one position per column.
#[derive(Clone, PartialEq, Eq)]
pub struct WideLine {
    states: Vec<LineState>,
}

impl WideLine {
    pub fn undriven(size: usize) -> Self {
        Self { states: vec![LineState::Undriven; size] }
    }

    pub fn filled(size: usize, state: LineState) -> Self {
        Self { states: vec![state; size] }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, column: usize) -> LineState {
        self.states.get(column).copied().unwrap_or_default()
    }

    pub fn set(&mut self, column: usize, state: LineState) {
        self.states[column] = state;
    }

    pub fn states(&self) -> &[LineState] {
        &self.states
    }

    pub fn driven_count(&self) -> usize {
        self.states.iter().filter(|s| s.is_driven()).count()
    }

    pub fn is_all_undriven(&self) -> bool {
        self.driven_count() == 0
    }

    /// Merge another driver's output into this line.
    ///
    /// A position may be driven by at most one driver per cycle; a second
    /// driver on the same position is reported, never resolved.
    pub fn overlay(&mut self, other: &WideLine) -> CircuitResult<()> {
        debug_assert_eq!(self.len(), other.len());
        for (column, (mine, theirs)) in self.states.iter_mut().zip(other.states.iter()).enumerate() {
            if !theirs.is_driven() {
                continue;
            }
            if mine.is_driven() {
                return Err(CircuitError::BusContention { column });
            }
            *mine = *theirs;
        }
        Ok(())
    }
}

impl fmt::Debug for WideLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WideLine({})", self.states.iter().rev().map(LineState::symbol).join(""))
    }
}

/// The line (`bl`) and its complement (`br`) of the shared bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitlinePair {
    pub bitline: WideLine,
    pub bitline_bar: WideLine,
}

impl BitlinePair {
    pub fn undriven(size: usize) -> Self {
        Self {
            bitline: WideLine::undriven(size),
            bitline_bar: WideLine::undriven(size),
        }
    }

    pub fn column_size(&self) -> usize {
        self.bitline.len()
    }

    pub fn overlay(&mut self, other: &BitlinePair) -> CircuitResult<()> {
        self.bitline.overlay(&other.bitline)?;
        self.bitline_bar.overlay(&other.bitline_bar)
    }

    /// The bit forced onto `column` by a differential drive, if any.
    /// Equal or undriven rails carry no data.
    pub fn differential(&self, column: usize) -> Option<bool> {
        match (self.bitline.get(column), self.bitline_bar.get(column)) {
            (LineState::High, LineState::Low) => Some(true),
            (LineState::Low, LineState::High) => Some(false),
            _ => None,
        }
    }
}
