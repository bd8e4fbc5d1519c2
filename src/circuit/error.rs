#[derive(Debug, thiserror::Error)]
pub enum CircuitError {
    #[error("circuit arguments invalid: {0}")]
    InvalidArguments(String),

    #[error("bus contention on column {column}: driven by more than one driver")]
    BusContention { column: usize },

    #[error("sram not ready in state {0}")]
    NotReady(String),

}

pub type CircuitResult<T> = Result<T, CircuitError>;

#[macro_export]
macro_rules! invalid_arg {
    ($msg:literal $(,)?) => {
        return Err($crate::circuit::CircuitError::InvalidArguments(format!($msg)).into())
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::circuit::CircuitError::InvalidArguments(format!($fmt, $($arg)*)).into())
    };
}

/// Return `CircuitError::InvalidArguments` from the enclosing function unless `cond` holds.
#[macro_export]
macro_rules! check_arg {
    ($cond:expr, $($arg:tt)+) => {
        if !($cond) {
            $crate::invalid_arg!($($arg)+);
        }
    };
}
