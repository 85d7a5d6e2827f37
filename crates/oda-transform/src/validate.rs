//! Preconditions for dataset conversion.

use crate::error::{Result, TransformError};

/// How a downloaded dataset should be finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Columns were kept and renamed to the preprocessed layout.
    pub pre_processed: bool,
    /// Coded columns should be converted to target codes.
    pub target_codes: bool,
}

impl Default for ConversionRequest {
    fn default() -> Self {
        Self {
            pre_processed: true,
            target_codes: true,
        }
    }
}

/// Reject requests that cannot be satisfied before any work starts.
///
/// Code conversion relies on preprocessed column names.
///
/// # Errors
///
/// [`TransformError::PreprocessingRequired`] when conversion is requested
/// for a frame that is not preprocessed.
pub fn validate_request(request: &ConversionRequest) -> Result<()> {
    if request.target_codes && !request.pre_processed {
        return Err(TransformError::PreprocessingRequired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_without_preprocessing_is_rejected() {
        let request = ConversionRequest {
            pre_processed: false,
            target_codes: true,
        };
        assert!(matches!(
            validate_request(&request),
            Err(TransformError::PreprocessingRequired)
        ));
    }

    #[test]
    fn raw_frames_without_conversion_are_accepted() {
        let request = ConversionRequest {
            pre_processed: false,
            target_codes: false,
        };
        assert!(validate_request(&request).is_ok());
        assert!(validate_request(&ConversionRequest::default()).is_ok());
    }
}
