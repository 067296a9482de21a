use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Currency code used by payments, balances and conversions.
///
/// Fiat currencies and the crypto assets shown by the wallet share one catalog;
/// only a subset can be used to pay (see [`Currency::PAYABLE`]).
///
/// ## Minor units
///
/// Amounts are stored as an `i64` number of **minor units** (see `Money`).
/// `minor_units()` returns how many decimal digits are used when converting
/// between major units (`10.50 USD`) and minor units (`1050`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Btc,
    Eth,
    Sol,
    Usdt,
    Bnb,
}

impl Currency {
    /// Currencies accepted by the make-payment form.
    pub const PAYABLE: [Currency; 5] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Btc,
        Currency::Eth,
    ];

    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Btc => "BTC",
            Currency::Eth => "ETH",
            Currency::Sol => "SOL",
            Currency::Usdt => "USDT",
            Currency::Bnb => "BNB",
        }
    }

    /// Display symbol, written before the amount.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Btc => "₿",
            Currency::Eth => "Ξ",
            Currency::Sol => "SOL",
            Currency::Usdt => "₮",
            Currency::Bnb => "BNB",
        }
    }

    /// Human readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Currency::Usd => "US Dollar",
            Currency::Eur => "Euro",
            Currency::Gbp => "British Pound",
            Currency::Btc => "Bitcoin",
            Currency::Eth => "Ethereum",
            Currency::Sol => "Solana",
            Currency::Usdt => "Tether",
            Currency::Bnb => "Binance Coin",
        }
    }

    /// Number of fraction digits used when formatting/parsing amounts.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Usd | Currency::Eur | Currency::Gbp | Currency::Usdt => 2,
            Currency::Btc | Currency::Eth | Currency::Bnb => 8,
            Currency::Sol => 9,
        }
    }

    /// Returns `true` when the currency can be used to pay.
    #[must_use]
    pub fn is_payable(self) -> bool {
        Self::PAYABLE.contains(&self)
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "BTC" => Ok(Currency::Btc),
            "ETH" => Ok(Currency::Eth),
            "SOL" => Ok(Currency::Sol),
            "USDT" => Ok(Currency::Usdt),
            "BNB" => Ok(Currency::Bnb),
            other => Err(EngineError::UnknownCurrency(other.to_string())),
        }
    }
}

impl core::str::FromStr for Currency {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::try_from(s)
    }
}
