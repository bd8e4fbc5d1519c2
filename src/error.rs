use crate::{charz::CharzError, circuit::CircuitError};

#[derive(Debug, thiserror::Error)]
pub enum SramError {
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Circuit(#[from] CircuitError),

    #[error(transparent)]
    Charz(#[from] CharzError),

    #[error("{0}")]
    Message(String),

    #[error("{msg} >> {err}")]
    Context { msg: String, err: Box<dyn std::error::Error> }
}

pub type SramResult<T> = Result<T, SramError>;

pub trait ErrorContext<T> {
    fn context<S: Into<String>>(self, msg: S) -> SramResult<T>;
    fn with_context<S: Into<String>>(self, f: impl Fn() -> S) -> SramResult<T>;
}

impl<T, E: std::error::Error + 'static> ErrorContext<T> for Result<T, E> {
    fn context<S: Into<String>>(self, msg: S) -> SramResult<T> {
        self.map_err(|e| SramError::Context { msg: msg.into(), err: Box::new(e) })
    }

    fn with_context<S: Into<String>>(self, f: impl Fn() -> S) -> SramResult<T> {
        let msg = f();
        self.context(msg)
    }
}

impl SramError {
    pub fn msg<S: Into<String>>(msg: S) -> Self {
        Self::Message(msg.into())
    }
}
