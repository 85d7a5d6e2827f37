use oda_model::{Code, ModelError};
use oda_schemas::SchemaError;
use polars::prelude::PolarsError;

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("column not found: {column}")]
    MissingColumn { column: String },

    #[error("column {column} has codes without a mapping: {}", join_codes(.codes))]
    UnmappedCodes { column: String, codes: Vec<Code> },

    #[error("code conversion requires a preprocessed dataset")]
    PreprocessingRequired,

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub(crate) fn join_codes(codes: &[Code]) -> String {
    codes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, TransformError>;
