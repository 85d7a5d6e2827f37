//! Column-level code translation.

use std::collections::BTreeSet;

use oda_model::{Code, CodeMapping, TranslationOptions, UnmappedPolicy};
use polars::prelude::*;
use tracing::{debug, warn};

use crate::error::{Result, TransformError, join_codes};
use crate::polars_utils::{any_to_code, codes_to_column};

/// Outcome of translating one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnReport {
    pub source: String,
    pub target: String,
    /// Rows in the frame.
    pub rows: usize,
    /// Non-null values found in the mapping.
    pub mapped: usize,
    /// Distinct non-null values missing from the mapping.
    pub unmapped: BTreeSet<Code>,
}

impl ColumnReport {
    /// Whether every non-null value was mapped.
    pub fn is_complete(&self) -> bool {
        self.unmapped.is_empty()
    }
}

/// Applies code mappings to dataset columns.
#[derive(Debug, Clone, Default)]
pub struct ColumnTranslator {
    options: TranslationOptions,
}

impl ColumnTranslator {
    pub fn new(options: TranslationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TranslationOptions {
        &self.options
    }

    /// Translate `source_column` through `mapping` into `target_column`.
    ///
    /// Returns a new frame; `df` is not modified. Values without a mapping
    /// entry keep their source value (subject to the unmapped policy) and
    /// nulls stay null. Row count, row order and all other columns are
    /// preserved.
    ///
    /// # Errors
    ///
    /// - [`TransformError::MissingColumn`] when `source_column` is absent
    /// - [`TransformError::UnmappedCodes`] under [`UnmappedPolicy::Fail`]
    pub fn translate(
        &self,
        df: &DataFrame,
        mapping: &CodeMapping,
        source_column: &str,
        target_column: &str,
    ) -> Result<DataFrame> {
        self.translate_with_report(df, mapping, source_column, target_column)
            .map(|(translated, _)| translated)
    }

    /// [`translate`](Self::translate), also returning what was mapped.
    pub fn translate_with_report(
        &self,
        df: &DataFrame,
        mapping: &CodeMapping,
        source_column: &str,
        target_column: &str,
    ) -> Result<(DataFrame, ColumnReport)> {
        let column = df
            .column(source_column)
            .map_err(|_| TransformError::MissingColumn {
                column: source_column.to_string(),
            })?;

        let mut translated: Vec<Option<Code>> = Vec::with_capacity(df.height());
        let mut mapped = 0usize;
        let mut unmapped = BTreeSet::new();
        for idx in 0..df.height() {
            let value = any_to_code(column.get(idx)?).map(|code| {
                if let Some(target) = mapping.lookup(&code) {
                    mapped += 1;
                    target.clone()
                } else {
                    unmapped.insert(code.clone());
                    code
                }
            });
            translated.push(value);
        }

        let report = ColumnReport {
            source: source_column.to_string(),
            target: target_column.to_string(),
            rows: df.height(),
            mapped,
            unmapped,
        };
        self.apply_policy(&report)?;

        if mapped == 0 && source_column == target_column {
            debug!(column = source_column, "no codes mapped, column unchanged");
            return Ok((df.clone(), report));
        }

        let dtype = column.dtype();
        let integer_dtype = dtype.is_integer().then_some(dtype);
        let output = codes_to_column(target_column, &translated, integer_dtype)?;
        let mut out = df.clone();
        out.with_column(output)?;

        debug!(
            source = source_column,
            target = target_column,
            rows = report.rows,
            mapped = report.mapped,
            unmapped = report.unmapped.len(),
            "translated column"
        );
        Ok((out, report))
    }

    fn apply_policy(&self, report: &ColumnReport) -> Result<()> {
        if report.unmapped.is_empty() {
            return Ok(());
        }
        match self.options.unmapped {
            UnmappedPolicy::PassThrough => Ok(()),
            UnmappedPolicy::Warn => {
                let codes: Vec<Code> = report.unmapped.iter().cloned().collect();
                warn!(
                    column = %report.source,
                    count = codes.len(),
                    codes = %join_codes(&codes),
                    "codes without a mapping left unchanged"
                );
                Ok(())
            }
            UnmappedPolicy::Fail => Err(TransformError::UnmappedCodes {
                column: report.source.clone(),
                codes: report.unmapped.iter().cloned().collect(),
            }),
        }
    }
}
