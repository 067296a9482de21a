use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::{Currency, EngineError, ResultEngine};

/// Signed money amount represented as **integer minor units**.
///
/// The number of minor units per major unit depends on the [`Currency`] the
/// amount is paired with (2 for USD, 8 for BTC, ...), so the currency is passed
/// to every method that converts between the two representations.
///
/// # Examples
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.minor(), 1234);
/// assert_eq!(amount.format(Currency::Usd), "$12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects
/// more decimals than the currency supports):
///
/// ```rust
/// use engine::{Currency, Money};
///
/// assert_eq!(Money::parse_major("10,5", Currency::Usd).unwrap().minor(), 1050);
/// assert_eq!(Money::parse_major("0.58", Currency::Btc).unwrap().minor(), 58_000_000);
/// assert!(Money::parse_major("12.345", Currency::Usd).is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Parses a decimal string expressed in major units.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - at most `currency.minor_units()` fractional digits
    /// - rejects empty/invalid strings
    pub fn parse_major(s: &str, currency: Currency) -> ResultEngine<Self> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

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

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let major_str = parts.next().ok_or_else(invalid)?;
        let frac_str = parts.next().unwrap_or("");
        if parts.next().is_some() {
            return Err(invalid());
        }

        if major_str.is_empty() || !major_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if !frac_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let digits = usize::from(currency.minor_units());
        if frac_str.len() > digits {
            return Err(EngineError::InvalidAmount("too many decimals".to_string()));
        }

        let scale = 10i64.pow(u32::from(currency.minor_units()));
        let major: i64 = major_str.parse().map_err(|_| overflow())?;
        let frac: i64 = if frac_str.is_empty() {
            0
        } else {
            let padded = format!("{frac_str:0<digits$}");
            padded.parse().map_err(|_| invalid())?
        };

        let total = major
            .checked_mul(scale)
            .and_then(|v| v.checked_add(frac))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -total } else { total }))
    }

    /// Formats the amount with the currency symbol and thousands separators.
    ///
    /// Fiat amounts always show two decimals; currencies with more minor units
    /// drop trailing zeros down to two decimals (`₿0.58`).
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let (sign, major, frac) = self.split(currency);
        let mut frac = frac;
        while frac.len() > 2 && frac.ends_with('0') {
            frac.pop();
        }
        format!(
            "{sign}{symbol}{major}.{frac}",
            symbol = currency.symbol(),
            major = group_thousands(major)
        )
    }

    /// Shortest plain decimal rendering, without symbol or grouping
    /// (`250.00` renders as `250`, `125.50` as `125.5`).
    #[must_use]
    pub fn plain(self, currency: Currency) -> String {
        let (sign, major, frac) = self.split(currency);
        let frac = frac.trim_end_matches('0');
        if frac.is_empty() {
            format!("{sign}{major}")
        } else {
            format!("{sign}{major}.{frac}")
        }
    }

    fn split(self, currency: Currency) -> (&'static str, u64, String) {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = usize::from(currency.minor_units());
        let scale = 10u64.pow(u32::from(currency.minor_units()));
        let abs = self.0.unsigned_abs();
        (sign, abs / scale, format!("{:0digits$}", abs % scale))
    }
}

fn group_thousands(value: u64) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (idx, ch) in raw.chars().enumerate() {
        if idx > 0 && (raw.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_uses_symbol_and_grouping() {
        assert_eq!(Money::new(0).format(Currency::Usd), "$0.00");
        assert_eq!(Money::new(25).format(Currency::Usd), "$0.25");
        assert_eq!(Money::new(845_297).format(Currency::Usd), "$8,452.97");
        assert_eq!(Money::new(-1050).format(Currency::Eur), "-€10.50");
        assert_eq!(Money::new(123_456_789_00).format(Currency::Gbp), "£123,456,789.00");
    }

    #[test]
    fn format_trims_crypto_precision_to_two_decimals() {
        assert_eq!(Money::new(58_000_000).format(Currency::Btc), "₿0.58");
        assert_eq!(Money::new(460_000_000).format(Currency::Eth), "Ξ4.60");
        assert_eq!(Money::new(12_345_678).format(Currency::Btc), "₿0.12345678");
    }

    #[test]
    fn plain_drops_trailing_zeros() {
        assert_eq!(Money::new(25_000).plain(Currency::Usd), "250");
        assert_eq!(Money::new(12_550).plain(Currency::Usd), "125.5");
        assert_eq!(Money::new(4_230).plain(Currency::Usd), "42.3");
        assert_eq!(Money::new(3_280).plain(Currency::Usd), "32.8");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        let usd = Currency::Usd;
        assert_eq!(Money::parse_major("10", usd).unwrap().minor(), 1000);
        assert_eq!(Money::parse_major("10.5", usd).unwrap().minor(), 1050);
        assert_eq!(Money::parse_major("10,50", usd).unwrap().minor(), 1050);
        assert_eq!(Money::parse_major("-0.01", usd).unwrap().minor(), -1);
        assert_eq!(Money::parse_major("+1.00", usd).unwrap().minor(), 100);
        assert_eq!(Money::parse_major("  2.30 ", usd).unwrap().minor(), 230);
        assert_eq!(Money::parse_major("7.", usd).unwrap().minor(), 700);
    }

    #[test]
    fn parse_rejects_garbage_and_extra_decimals() {
        let usd = Currency::Usd;
        assert!(Money::parse_major("", usd).is_err());
        assert!(Money::parse_major("-", usd).is_err());
        assert!(Money::parse_major("abc", usd).is_err());
        assert!(Money::parse_major("1.2.3", usd).is_err());
        assert!(Money::parse_major("12.345", usd).is_err());
        assert!(Money::parse_major("0.000000001", Currency::Btc).is_err());
        assert!(Money::parse_major("99999999999999999999", usd).is_err());
    }
}
