use thiserror::Error;

/// Unit suffixes, one per power of 1000.
pub const UNITS: [&str; 22] = [
    "", "K", "M", "B", "T", "Qa", "Qi", "Sx", "Sp", "O", "N", "D", "UD", "DD", "TD", "QaD", "QiD",
    "SxD", "SpD", "OD", "ND", "V",
];

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum FormatError {
    #[error("cannot abbreviate a non-finite value")]
    NotFinite,

    #[error("cannot abbreviate negative value {value}")]
    Negative { value: f64 },

    #[error("no unit for 1000^{exponent}")]
    OutOfRange { exponent: usize },
}

/// Abbreviates a number with an escalating unit suffix.
///
/// Values below 1000 print with no decimals; larger ones are reduced by
/// powers of 1000 and printed with three significant digits. A value that
/// rounds up to 1000 in its unit is shown in the next unit instead, so
/// `999.5` prints as `1.00K`.
///
/// # Errors
///
/// Returns `FormatError` for negative or non-finite input, or when the value
/// needs a unit past the end of [`UNITS`].
///
/// # Examples
///
/// ```
/// # use clicker_core::format::abbreviate;
/// assert_eq!(abbreviate(999.0)?, "999");
/// assert_eq!(abbreviate(1_000.0)?, "1.00K");
/// assert_eq!(abbreviate(1_000_000.0)?, "1.00M");
/// # Ok::<(), clicker_core::format::FormatError>(())
/// ```
pub fn abbreviate(value: f64) -> Result<String, FormatError> {
    if !value.is_finite() {
        return Err(FormatError::NotFinite);
    }
    if value < 0.0 {
        return Err(FormatError::Negative { value });
    }

    let mut reduced = value;
    let mut exponent = 0_usize;
    while reduced >= 1000.0 {
        reduced /= 1000.0;
        exponent += 1;
    }

    let mut digits = if exponent == 0 {
        format!("{reduced:.0}")
    } else {
        three_significant(reduced)
    };
    if digits == "1000" {
        // 999.5 and up rounds into the next unit.
        exponent += 1;
        digits = "1.00".to_owned();
    }
    if exponent == 0 {
        return Ok(digits);
    }

    let unit = UNITS
        .get(exponent)
        .ok_or(FormatError::OutOfRange { exponent })?;
    Ok(format!("{digits}{unit}"))
}

/// Formats `value` in `[1, 1000)` with three significant digits.
fn three_significant(value: f64) -> String {
    let decimals: usize = if value < 10.0 {
        2
    } else if value < 100.0 {
        1
    } else {
        0
    };
    let text = format!("{value:.decimals$}");

    // 9.996 prints as "10.00"; drop the extra digit.
    let carried = match decimals {
        2 => text.starts_with("10."),
        1 => text.starts_with("100."),
        _ => false,
    };
    if carried {
        let decimals = decimals - 1;
        format!("{value:.decimals$}")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values_have_no_unit_or_decimals() {
        assert_eq!(abbreviate(0.0).unwrap(), "0");
        assert_eq!(abbreviate(7.0).unwrap(), "7");
        assert_eq!(abbreviate(999.0).unwrap(), "999");
        assert_eq!(abbreviate(12.4).unwrap(), "12");
    }

    #[test]
    fn thousands_and_millions() {
        assert_eq!(abbreviate(1_000.0).unwrap(), "1.00K");
        assert_eq!(abbreviate(1_000_000.0).unwrap(), "1.00M");
        assert_eq!(abbreviate(1_234.0).unwrap(), "1.23K");
        assert_eq!(abbreviate(45_600.0).unwrap(), "45.6K");
        assert_eq!(abbreviate(789_000.0).unwrap(), "789K");
    }

    #[test]
    fn every_unit_in_table_is_reachable() {
        for (exponent, unit) in UNITS.iter().enumerate().skip(1) {
            let value = 2.5 * 1000_f64.powi(i32::try_from(exponent).unwrap());
            assert_eq!(abbreviate(value).unwrap(), format!("2.50{unit}"));
        }
    }

    #[test]
    fn rounding_carries_into_next_digit_or_unit() {
        assert_eq!(abbreviate(9_996.0).unwrap(), "10.0K");
        assert_eq!(abbreviate(99_960.0).unwrap(), "100K");
        assert_eq!(abbreviate(999_999.9).unwrap(), "1.00M");
    }

    #[test]
    fn plain_values_rounding_to_a_thousand_carry_into_k() {
        assert_eq!(abbreviate(999.4).unwrap(), "999");
        assert_eq!(abbreviate(999.5).unwrap(), "1.00K");
        assert_eq!(abbreviate(999.9).unwrap(), "1.00K");
        assert_eq!(abbreviate(999_500.0).unwrap(), "1.00M");
    }

    #[test]
    fn past_the_table_is_out_of_range() {
        let err = abbreviate(1e66).unwrap_err();
        assert_eq!(err, FormatError::OutOfRange { exponent: 22 });
    }

    #[test]
    fn negative_and_non_finite_are_rejected() {
        assert_eq!(
            abbreviate(-1.0).unwrap_err(),
            FormatError::Negative { value: -1.0 }
        );
        assert_eq!(abbreviate(f64::NAN).unwrap_err(), FormatError::NotFinite);
        assert_eq!(abbreviate(f64::INFINITY).unwrap_err(), FormatError::NotFinite);
    }
}
