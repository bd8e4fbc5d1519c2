use std::fmt;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Clock edges from an accepted request to `ready`.
pub const OPERATION_CYCLES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlState {
    /// At rest, bus conditioned
    #[default]
    Idle,
    /// Bus conditioned, column address predecoded
    Precharge,
    /// Wordline on, bitlines settle; nothing is sensed or forced yet
    Develop,
    /// Sense or write
    Access,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    #[default]
    Read,
    Write,
}

/// Enables driven by the control logic for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlSignals {
    pub precharge_enable: bool,
    pub row_decode_enable: bool,
    pub column_decode_enable: bool,
    pub read_enable: bool,
    pub write_enable: bool,
    pub ready: bool,
}

impl ControlState {
    /// Next state on a clock edge. Precharge and develop always progress, so
    /// a started operation cannot be cancelled before `Access`.
    pub fn next(self, request_enable: bool) -> Self {
        match (self, request_enable) {
            (Self::Idle, false) => Self::Idle,
            (Self::Idle, true) => Self::Precharge,
            (Self::Precharge, _) => Self::Develop,
            (Self::Develop, _) => Self::Access,
            (Self::Access, false) => Self::Idle,
            (Self::Access, true) => Self::Precharge,
        }
    }

    /// Outputs of this state given the latched mode.
    pub fn signals(self, mode: AccessMode) -> ControlSignals {
        match self {
            Self::Idle => ControlSignals {
                precharge_enable: true,
                ready: true,
                ..Default::default()
            },
            Self::Precharge => ControlSignals {
                precharge_enable: true,
                column_decode_enable: true,
                ..Default::default()
            },
            Self::Develop => ControlSignals {
                row_decode_enable: true,
                column_decode_enable: true,
                ..Default::default()
            },
            Self::Access => ControlSignals {
                row_decode_enable: true,
                column_decode_enable: true,
                read_enable: mode == AccessMode::Read,
                write_enable: mode == AccessMode::Write,
                ready: true,
                ..Default::default()
            },
        }
    }
}

impl fmt::Display for ControlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "IDLE",
            Self::Precharge => "PRECHARGE",
            Self::Develop => "DEVELOP",
            Self::Access => "ACCESS",
        };
        f.write_str(name)
    }
}

/// The clocked state of the macro: current state and the mode committed when
/// the running operation entered precharge.
#[derive(Debug, Clone, Default)]
pub struct ControlLogic {
    state: ControlState,
    latched_mode: AccessMode,
}

impl ControlLogic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    pub fn latched_mode(&self) -> AccessMode {
        self.latched_mode
    }

    pub fn signals(&self) -> ControlSignals {
        self.state.signals(self.latched_mode)
    }

    /// Apply one clock edge. `mode` is only sampled when the edge starts a
    /// new operation, from `Idle` or back-to-back from `Access`.
    pub fn clock(&mut self, request_enable: bool, mode: AccessMode) {
        let next = self.state.next(request_enable);
        if next == ControlState::Precharge {
            self.latched_mode = mode;
        }
        if next != self.state {
            debug!("control {} -> {} ({:?})", self.state, next, self.latched_mode);
        }
        self.state = next;
    }

    pub fn reset(&mut self) {
        self.state = ControlState::Idle;
        self.latched_mode = AccessMode::Read;
    }
}
