use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum AmountError {
    #[error("amount is missing")]
    Missing,

    #[error("amount is not a number")]
    NotANumber,

    #[error("amount must be finite")]
    Infinite,

    #[error("amount must be >= 0, got {provided}")]
    Negative { provided: f64 },

    #[error("amount {raw:?} is not a real number")]
    Unparseable { raw: String },
}

/// A validated XP amount submitted by the player.
///
/// Always finite and non-negative. Fractional values are kept as-is.
///
/// # Examples
///
/// ```
/// # use clicker_core::model::Amount;
/// let amount: Amount = " 2.5 ".parse()?;
/// assert_eq!(amount.value(), 2.5);
/// assert!("-1".parse::<Amount>().is_err());
/// # Ok::<(), clicker_core::model::AmountError>(())
/// ```
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    /// Validates a raw floating point amount.
    ///
    /// # Errors
    ///
    /// Returns `AmountError` for NaN, infinite or negative input.
    pub fn new(value: f64) -> Result<Self, AmountError> {
        if value.is_nan() {
            return Err(AmountError::NotANumber);
        }
        if value.is_infinite() {
            return Err(AmountError::Infinite);
        }
        if value < 0.0 {
            return Err(AmountError::Negative { provided: value });
        }
        // -0.0 passes the sign check; store it as +0.0.
        Ok(Self(value + 0.0))
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Missing);
        }
        let value = trimmed
            .parse::<f64>()
            .map_err(|_| AmountError::Unparseable {
                raw: trimmed.to_owned(),
            })?;
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_integers_and_fractions() {
        assert_eq!("5".parse::<Amount>().unwrap().value(), 5.0);
        assert_eq!("0.25".parse::<Amount>().unwrap().value(), 0.25);
        assert_eq!("1e3".parse::<Amount>().unwrap().value(), 1000.0);
    }

    #[test]
    fn rejects_negative_values() {
        let err = "-3".parse::<Amount>().unwrap_err();
        assert_eq!(err, AmountError::Negative { provided: -3.0 });
    }

    #[test]
    fn rejects_nan_and_infinity() {
        assert_eq!("NaN".parse::<Amount>().unwrap_err(), AmountError::NotANumber);
        assert_eq!("inf".parse::<Amount>().unwrap_err(), AmountError::Infinite);
        assert_eq!(Amount::new(f64::NEG_INFINITY).unwrap_err(), AmountError::Infinite);
    }

    #[test]
    fn rejects_blank_and_garbage() {
        assert_eq!("   ".parse::<Amount>().unwrap_err(), AmountError::Missing);
        assert!(matches!(
            "ten".parse::<Amount>().unwrap_err(),
            AmountError::Unparseable { .. }
        ));
    }

    #[test]
    fn negative_zero_is_normalized() {
        let amount = Amount::new(-0.0).unwrap();
        assert!(amount.value().is_sign_positive());
    }
}
