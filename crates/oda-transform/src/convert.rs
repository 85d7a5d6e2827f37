//! Dataset-level code conversion for the DAC series.

use oda_model::CodeMapping;
use oda_schemas::MappingCatalog;
use polars::prelude::DataFrame;
use tracing::info;

use crate::columns::{AIDTYPE_CODE, DATA_TYPE_CODE, DONOR_CODE, RECIPIENT_CODE};
use crate::error::Result;
use crate::translate::{ColumnReport, ColumnTranslator};

/// Convert a preprocessed DAC2 frame to explorer area and price codes.
///
/// Donor and recipient codes go through the corrected DAC2 area table; data
/// type codes go through the inverted DAC1 price table. All mappings are
/// loaded before any column is touched, so a failure leaves nothing half done.
pub fn convert_to_target_codes(
    df: &DataFrame,
    catalog: &MappingCatalog<'_>,
    translator: &ColumnTranslator,
) -> Result<DataFrame> {
    convert_to_target_codes_with_report(df, catalog, translator).map(|(converted, _)| converted)
}

/// [`convert_to_target_codes`], also returning one report per column.
pub fn convert_to_target_codes_with_report(
    df: &DataFrame,
    catalog: &MappingCatalog<'_>,
    translator: &ColumnTranslator,
) -> Result<(DataFrame, Vec<ColumnReport>)> {
    let area_codes = catalog.dac2_area_codes()?;
    let prices = catalog.dac1_prices()?.invert()?;

    apply(
        df,
        translator,
        &[
            (&area_codes, DONOR_CODE),
            (&area_codes, RECIPIENT_CODE),
            (&prices, DATA_TYPE_CODE),
        ],
    )
}

/// Convert a DAC1 frame back to legacy donor and amount type codes.
///
/// Donor codes go through the inverted DAC1 area table (area code to legacy
/// donor code); aid type codes go through the DAC1 price table.
///
/// The area table must be one-to-one. When two legacy donor codes share an
/// area code the conversion fails with
/// [`ModelError::AmbiguousInversion`](oda_model::ModelError::AmbiguousInversion)
/// naming both, rather than picking one of them silently.
pub fn convert_dac1_codes(
    df: &DataFrame,
    catalog: &MappingCatalog<'_>,
    translator: &ColumnTranslator,
) -> Result<DataFrame> {
    convert_dac1_codes_with_report(df, catalog, translator).map(|(converted, _)| converted)
}

/// [`convert_dac1_codes`], also returning one report per column.
pub fn convert_dac1_codes_with_report(
    df: &DataFrame,
    catalog: &MappingCatalog<'_>,
    translator: &ColumnTranslator,
) -> Result<(DataFrame, Vec<ColumnReport>)> {
    let donor_codes = catalog.dac1_area_codes()?.invert()?;
    let aidtype_codes = catalog.dac1_prices()?;

    apply(
        df,
        translator,
        &[(&donor_codes, DONOR_CODE), (&aidtype_codes, AIDTYPE_CODE)],
    )
}

fn apply(
    df: &DataFrame,
    translator: &ColumnTranslator,
    steps: &[(&CodeMapping, &str)],
) -> Result<(DataFrame, Vec<ColumnReport>)> {
    let mut current = df.clone();
    let mut reports = Vec::with_capacity(steps.len());
    for (mapping, column) in steps {
        let (next, report) = translator.translate_with_report(&current, mapping, column, column)?;
        current = next;
        reports.push(report);
    }
    let mapped: usize = reports.iter().map(|report| report.mapped).sum();
    info!(
        rows = current.height(),
        columns = reports.len(),
        mapped,
        "converted codes"
    );
    Ok((current, reports))
}
