//! Monetary amounts in integer cents.
//!
//! The API sends amounts either as JSON numbers (`120.5`) or as decimal strings
//! (`"120.50"`). Both are read into [`Cents`] so sums never depend on float ordering.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{self, Display};
use std::iter::Sum;
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cents(pub i64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    /// Rounds `amount` (in currency units) to the nearest cent.
    pub fn from_amount(amount: f64) -> Option<Self> {
        amount
            .is_finite()
            .then(|| Cents((amount * 100.0).round() as i64))
    }

    pub fn as_amount(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `self` as a percentage of `total`, rounded to one decimal place.
    pub fn percent_of(self, total: Cents) -> f64 {
        if total.0 <= 0 {
            return 0.0;
        }
        let tenths = (self.0 as i128 * 1000 + total.0 as i128 / 2) / total.0 as i128;
        tenths as f64 / 10.0
    }
}

impl Add for Cents {
    type Output = Cents;

    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0 + rhs.0)
    }
}

impl Sub for Cents {
    type Output = Cents;

    fn sub(self, rhs: Cents) -> Cents {
        Cents(self.0 - rhs.0)
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Cents {
        iter.fold(Cents::ZERO, Add::add)
    }
}

impl Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Serialize for Cents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_amount())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Cents {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = match RawAmount::deserialize(deserializer)? {
            RawAmount::Number(number) => number,
            RawAmount::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| de::Error::custom(format!("invalid amount {text:?}")))?,
        };
        Cents::from_amount(amount).ok_or_else(|| de::Error::custom("amount is not finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_numbers_and_decimal_strings() {
        let from_number: Cents = serde_json::from_value(json!(120.5)).unwrap();
        let from_text: Cents = serde_json::from_value(json!("120.50")).unwrap();
        assert_eq!(from_number, Cents(12050));
        assert_eq!(from_text, from_number);
        assert!(serde_json::from_value::<Cents>(json!("abc")).is_err());
    }

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Cents(12050).to_string(), "120.50");
        assert_eq!(Cents(-5).to_string(), "-0.05");
        assert_eq!(serde_json::to_value(Cents(7525)).unwrap(), json!(75.25));
    }

    #[test]
    fn percent_is_rounded_to_one_decimal() {
        assert_eq!(Cents(100).percent_of(Cents(300)), 33.3);
        assert_eq!(Cents(200).percent_of(Cents(300)), 66.7);
        assert_eq!(Cents(5).percent_of(Cents::ZERO), 0.0);
    }
}
