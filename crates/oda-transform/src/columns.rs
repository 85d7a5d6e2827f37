//! Coded column names of preprocessed datasets.

/// Reporting country or organisation.
pub const DONOR_CODE: &str = "donor_code";
/// Recipient country or region (DAC2).
pub const RECIPIENT_CODE: &str = "recipient_code";
/// Amount type / price basis (DAC2).
pub const DATA_TYPE_CODE: &str = "data_type_code";
/// Amount type / price basis (DAC1).
pub const AIDTYPE_CODE: &str = "aidtype_code";
