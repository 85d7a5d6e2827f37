//! Polars `AnyValue` helpers for coded columns.

use oda_model::Code;
use polars::prelude::*;

/// Converts a Polars `AnyValue` to a [`Code`].
///
/// Integer values become [`Code::Int`], as do floats without a fractional
/// part (CSV readers widen integer columns that contain gaps). Everything
/// else is carried as text. Returns `None` for `Null`.
///
/// # Examples
///
/// ```
/// use oda_model::Code;
/// use oda_transform::any_to_code;
/// use polars::prelude::AnyValue;
///
/// assert_eq!(any_to_code(AnyValue::Null), None);
/// assert_eq!(any_to_code(AnyValue::Int32(801)), Some(Code::Int(801)));
/// assert_eq!(any_to_code(AnyValue::String("AUS")), Some(Code::from("AUS")));
/// ```
pub fn any_to_code(value: AnyValue<'_>) -> Option<Code> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(Code::Int(i64::from(v))),
        AnyValue::Int16(v) => Some(Code::Int(i64::from(v))),
        AnyValue::Int32(v) => Some(Code::Int(i64::from(v))),
        AnyValue::Int64(v) => Some(Code::Int(v)),
        AnyValue::UInt8(v) => Some(Code::Int(i64::from(v))),
        AnyValue::UInt16(v) => Some(Code::Int(i64::from(v))),
        AnyValue::UInt32(v) => Some(Code::Int(i64::from(v))),
        AnyValue::UInt64(v) => Some(
            i64::try_from(v).map_or_else(|_| Code::Text(v.to_string()), Code::Int),
        ),
        AnyValue::Float32(v) => Some(float_to_code(f64::from(v))),
        AnyValue::Float64(v) => Some(float_to_code(v)),
        AnyValue::String(s) => Some(Code::Text(s.to_string())),
        AnyValue::StringOwned(s) => Some(Code::Text(s.to_string())),
        other => Some(Code::Text(other.to_string())),
    }
}

fn float_to_code(v: f64) -> Code {
    if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        Code::Int(v as i64)
    } else {
        Code::Text(format_numeric(v))
    }
}

/// Formats a floating-point number as a string without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Builds a column from translated codes.
///
/// The column is integer typed when every non-null code is an integer and
/// string typed otherwise. An integer column is cast to `integer_dtype` when
/// given and every value fits.
pub fn codes_to_column(
    name: &str,
    codes: &[Option<Code>],
    integer_dtype: Option<&DataType>,
) -> PolarsResult<Column> {
    let all_int = codes.iter().flatten().all(Code::is_int);
    if !all_int {
        let values: Vec<Option<String>> = codes
            .iter()
            .map(|code| code.as_ref().map(ToString::to_string))
            .collect();
        return Ok(Series::new(name.into(), values).into());
    }

    let values: Vec<Option<i64>> = codes
        .iter()
        .map(|code| code.as_ref().and_then(Code::as_int))
        .collect();
    let series = Series::new(name.into(), values);
    let series = match integer_dtype {
        Some(dtype) if dtype != &DataType::Int64 => series.strict_cast(dtype).unwrap_or(series),
        _ => series,
    };
    Ok(series.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_become_integer_codes() {
        assert_eq!(any_to_code(AnyValue::Float64(801.0)), Some(Code::Int(801)));
        assert_eq!(
            any_to_code(AnyValue::Float64(1.5)),
            Some(Code::from("1.5"))
        );
    }

    #[test]
    fn format_numeric_keeps_integers_intact() {
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(2.50), "2.5");
    }

    #[test]
    fn mixed_codes_build_a_string_column() {
        let codes = vec![Some(Code::Int(1)), None, Some(Code::from("AUS"))];
        let column = codes_to_column("donor_code", &codes, None).unwrap();
        assert_eq!(column.dtype(), &DataType::String);
        let values = column.str().unwrap();
        assert_eq!(values.get(0), Some("1"));
        assert_eq!(values.get(1), None);
        assert_eq!(values.get(2), Some("AUS"));
    }

    #[test]
    fn integer_codes_keep_the_source_width() {
        let codes = vec![Some(Code::Int(801)), None];
        let column = codes_to_column("donor_code", &codes, Some(&DataType::Int32)).unwrap();
        assert_eq!(column.dtype(), &DataType::Int32);
        assert_eq!(column.i32().unwrap().get(0), Some(801));
    }
}
