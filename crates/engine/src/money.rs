use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::EngineError;

/// Number of minor units in one major unit.
const MINOR_PER_MAJOR: i64 = 100;

/// Signed money amount represented as **integer minor units** (1/100).
///
/// The backing document stores amounts as plain JSON numbers (`100`, `12.5`);
/// this type converts them on the way in and out so that sums never drift.
///
/// # Examples
///
/// ```rust
/// use engine::Amount;
///
/// let amount = Amount::new(12_34);
/// assert_eq!(amount.minor(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing accepts `.` or `,` as decimal separator and rejects more than two
/// decimals:
///
/// ```rust
/// use engine::Amount;
///
/// assert_eq!("10".parse::<Amount>().unwrap().minor(), 1000);
/// assert_eq!("10,5".parse::<Amount>().unwrap().minor(), 1050);
/// assert!("12.345".parse::<Amount>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Creates a new amount from minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Creates a new amount from whole major units.
    #[must_use]
    pub const fn from_major(major: i64) -> Self {
        Self(major * MINOR_PER_MAJOR)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Checked subtraction. Returns `None` on overflow.
    #[must_use]
    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_sub(rhs.0).map(Amount)
    }

    /// Whole major units, without sign.
    #[must_use]
    pub const fn abs_major(self) -> u64 {
        self.0.unsigned_abs() / MINOR_PER_MAJOR as u64
    }

    /// Fractional minor units, without sign.
    #[must_use]
    pub const fn abs_fraction(self) -> u64 {
        self.0.unsigned_abs() % MINOR_PER_MAJOR as u64
    }

    /// JSON representation: an integer when there is no fraction, a float
    /// otherwise.
    #[must_use]
    pub fn to_json_number(self) -> serde_json::Number {
        if self.0 % MINOR_PER_MAJOR == 0 {
            return serde_json::Number::from(self.0 / MINOR_PER_MAJOR);
        }
        let value = self.0 as f64 / MINOR_PER_MAJOR as f64;
        serde_json::Number::from_f64(value)
            .unwrap_or_else(|| serde_json::Number::from(self.0 / MINOR_PER_MAJOR))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let major = self.abs_major();
        match self.abs_fraction() {
            0 => write!(f, "{sign}{major}"),
            frac => write!(f, "{sign}{major}.{frac:02}"),
        }
    }
}

impl FromStr for Amount {
    type Err = EngineError;

    /// Parses a decimal string into minor units.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::Validation("empty amount".to_string());
        let invalid = || EngineError::Validation(format!("invalid amount: {s}"));
        let overflow = || EngineError::Validation("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim().replace(',', ".");
        if rest.is_empty() {
            return Err(empty());
        }

        let mut parts = rest.split('.');
        let major_str = parts.next().ok_or_else(invalid)?;
        let frac_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if major_str.is_empty() || !major_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let major: i64 = major_str.parse().map_err(|_| invalid())?;

        let frac: i64 = match frac_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => {
                        return Err(EngineError::Validation(
                            "amount has too many decimals".to_string(),
                        ));
                    }
                }
            }
        };

        let total = major
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|v| v.checked_add(frac))
            .ok_or_else(overflow)?;

        let signed = if negative {
            total.checked_neg().ok_or_else(overflow)?
        } else {
            total
        };

        Ok(Amount(signed))
    }
}

impl TryFrom<&serde_json::Number> for Amount {
    type Error = EngineError;

    /// Integers convert exactly. Floats are scaled to minor units and must
    /// come back unchanged when scaled down again, which rejects a third
    /// decimal.
    fn try_from(value: &serde_json::Number) -> Result<Self, Self::Error> {
        let overflow = || EngineError::Validation("amount too large".to_string());

        if let Some(major) = value.as_i64() {
            return major.checked_mul(MINOR_PER_MAJOR).map(Amount).ok_or_else(overflow);
        }
        if value.is_u64() {
            return Err(overflow());
        }

        let major = value
            .as_f64()
            .ok_or_else(|| EngineError::Validation(format!("invalid amount: {value}")))?;
        let minor = (major * MINOR_PER_MAJOR as f64).round();
        if !minor.is_finite() || minor < i64::MIN as f64 || minor >= i64::MAX as f64 {
            return Err(overflow());
        }
        if minor / MINOR_PER_MAJOR as f64 != major {
            return Err(EngineError::Validation(
                "amount has too many decimals".to_string(),
            ));
        }

        Ok(Amount(minor as i64))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_number().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = serde_json::Number::deserialize(deserializer)?;
        Amount::try_from(&number).map_err(de::Error::custom)
    }
}
