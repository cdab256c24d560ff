// src/data/money.rs - Currency-labelled amounts

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// ISO 4217 codes the generator can label amounts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Cad,
    Eur,
    Gbp,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Cad => "CAD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd | Self::Cad => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "CAD" => Ok(Self::Cad),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            other => Err(format!("unsupported currency code: {}", other)),
        }
    }
}

/// An amount in minor units (cents) tagged with its currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    pub cents: i64,
    pub currency: Currency,
}

impl Money {
    pub fn from_cents(cents: i64, currency: Currency) -> Self {
        Self { cents, currency }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::from_cents(0, currency)
    }

    /// Amount in major units
    pub fn amount(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// `self * rate`, rounded half away from zero to the nearest cent
    pub fn scale(&self, rate: f64) -> Self {
        Self::from_cents((self.cents as f64 * rate).round() as i64, self.currency)
    }

    /// Sum of two amounts; `None` when the currencies differ
    pub fn checked_add(self, other: Money) -> Option<Money> {
        (self.currency == other.currency)
            .then(|| Money::from_cents(self.cents + other.cents, self.currency))
    }

    /// Sum of `amounts`; `None` if the slice is empty or mixes currencies
    pub fn sum(amounts: &[Money]) -> Option<Money> {
        let (first, rest) = amounts.split_first()?;
        rest.iter().try_fold(*first, |acc, m| acc.checked_add(*m))
    }
}

/// Adding amounts of different currencies is a programming error
impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        assert_eq!(
            self.currency, other.currency,
            "cannot add {} to {}",
            other.currency, self.currency
        );
        Money::from_cents(self.cents + other.cents, self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(
            f,
            "{}{}{}.{:02} {}",
            sign,
            self.currency.symbol(),
            group_thousands(abs / 100),
            abs % 100,
            self.currency.code()
        )
    }
}

/// `1234567` -> `"1,234,567"`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(123456789, Currency::Usd).to_string(), "$1,234,567.89 USD");
        assert_eq!(Money::from_cents(-5, Currency::Eur).to_string(), "-€0.05 EUR");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_sum_and_mixed_currencies() {
        let usd = |c| Money::from_cents(c, Currency::Usd);
        assert_eq!(Money::sum(&[usd(100), usd(250), usd(5)]), Some(usd(355)));
        assert_eq!(Money::sum(&[]), None);
        assert_eq!(usd(1).checked_add(Money::from_cents(1, Currency::Cad)), None);
    }

    #[test]
    fn test_scale_rounds_to_cent() {
        let m = Money::from_cents(1005, Currency::Usd);
        assert_eq!(m.scale(0.0825).cents, 83);
    }

    #[test]
    fn test_currency_parsing() {
        assert_eq!("cad".parse::<Currency>().unwrap(), Currency::Cad);
        assert!("XYZ".parse::<Currency>().is_err());
        assert_eq!(serde_json::to_string(&Currency::Gbp).unwrap(), "\"GBP\"");
    }
}
