//! Error type shared by every fallible operation of the manager.

use thiserror::Error;

use crate::reference::ZddId;

/// Coarse classification of a [`ZddError`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    /// An argument is malformed or out of range.
    InvalidArgument,
    /// The arguments are well-formed, but the operation is undefined for them.
    PreconditionViolation,
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ZddError {
    #[error("element {element} is out of range 1..={max}")]
    ElementOutOfRange { element: u32, max: u32 },

    #[error("weight vector has {len} entries, but {required} are required")]
    WeightsTooShort { len: usize, required: usize },

    #[error("best score {score} does not fit in i64")]
    ScoreOutOfRange { score: i128 },

    #[error("family {0} does not belong to this manager")]
    UnknownFamily(ZddId),

    #[error("{op} requires a non-empty family")]
    EmptyFamily { op: &'static str },
}

impl ZddError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ZddError::ElementOutOfRange { .. }
            | ZddError::WeightsTooShort { .. }
            | ZddError::ScoreOutOfRange { .. }
            | ZddError::UnknownFamily(_) => ErrorKind::InvalidArgument,
            ZddError::EmptyFamily { .. } => ErrorKind::PreconditionViolation,
        }
    }
}

pub type Result<T> = std::result::Result<T, ZddError>;
