use thiserror::Error;

use crate::code::Code;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("mapping is not one-to-one: value {value} is shared by keys {first} and {second}")]
    AmbiguousInversion { value: Code, first: Code, second: Code },
    #[error("cannot coerce mapping key {key:?} to an integer")]
    KeyCoercion { key: String },
    #[error("mapping key {key} appears in both integer and text form")]
    DuplicateKey { key: Code },
}

pub type Result<T> = std::result::Result<T, ModelError>;
