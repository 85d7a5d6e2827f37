//! ODA dataset code translation.
//!
//! This crate applies code mappings from `oda-schemas` to polars frames:
//!
//! - **translate**: one coded column through one mapping, with a
//!   configurable unmapped-code policy
//! - **convert**: the DAC2 (explorer codes) and DAC1 (legacy codes) column sets
//! - **validate**: request preconditions checked before any work starts
//! - **columns**: coded column names of preprocessed frames

pub mod columns;
pub mod convert;
pub mod error;
pub mod polars_utils;
pub mod translate;
pub mod validate;

pub use convert::{
    convert_dac1_codes, convert_dac1_codes_with_report, convert_to_target_codes,
    convert_to_target_codes_with_report,
};
pub use error::{Result, TransformError};
pub use polars_utils::{any_to_code, codes_to_column, format_numeric};
pub use translate::{ColumnReport, ColumnTranslator};
pub use validate::{ConversionRequest, validate_request};
