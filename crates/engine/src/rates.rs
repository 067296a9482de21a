//! Static conversion rates.
//!
//! Every rate is quoted in USD per unit. There is no live feed: the table is
//! a constant, and a currency missing from it converts at rate `0`.

use std::{future::Future, time::Duration};

use serde::Serialize;

use crate::{
    Currency, EngineError, ResultEngine,
    notify::{Notifier, Toast},
    util::{Completion, simulated_delay},
};

/// Reference rate of one currency, in USD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateEntry {
    pub currency: Currency,
    pub usd: f64,
}

pub const REFERENCE_RATES: [RateEntry; 5] = [
    RateEntry { currency: Currency::Btc, usd: 58962.45 },
    RateEntry { currency: Currency::Eth, usd: 3145.87 },
    RateEntry { currency: Currency::Sol, usd: 172.34 },
    RateEntry { currency: Currency::Usdt, usd: 1.00 },
    RateEntry { currency: Currency::Bnb, usd: 575.62 },
];

#[derive(Debug, Clone)]
pub struct RateTable {
    entries: Vec<RateEntry>,
}

impl Default for RateTable {
    fn default() -> Self {
        Self::new(REFERENCE_RATES.to_vec())
    }
}

impl RateTable {
    pub fn new(entries: Vec<RateEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RateEntry] {
        &self.entries
    }

    /// USD rate for a currency code, if the table knows it.
    pub fn lookup(&self, code: &str) -> Option<f64> {
        let currency = Currency::try_from(code).ok()?;
        self.entries
            .iter()
            .find(|entry| entry.currency == currency)
            .map(|entry| entry.usd)
    }

    /// Units of `to` obtained for one unit of `from`. `0` when either side is
    /// unknown.
    pub fn rate(&self, from: &str, to: &str) -> f64 {
        match (self.lookup(from), self.lookup(to)) {
            (Some(from), Some(to)) if to > 0.0 => from / to,
            _ => 0.0,
        }
    }

    pub fn convert(&self, amount: f64, from: &str, to: &str) -> f64 {
        amount * self.rate(from, to)
    }
}

/// Inputs of the convert screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionForm {
    pub from: String,
    pub to: String,
    pub amount: String,
}

impl Default for ConversionForm {
    fn default() -> Self {
        Self {
            from: Currency::Btc.code().to_string(),
            to: Currency::Eth.code().to_string(),
            amount: String::new(),
        }
    }
}

impl ConversionForm {
    #[must_use]
    pub fn swap(mut self) -> Self {
        std::mem::swap(&mut self.from, &mut self.to);
        self
    }

    /// Price the form against `table`. A missing or invalid amount counts as 0.
    pub fn quote(&self, table: &RateTable) -> Quote {
        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .unwrap_or(0.0);
        let rate = table.rate(&self.from, &self.to);
        Quote {
            from: self.from.clone(),
            to: self.to.clone(),
            amount,
            rate,
            result: amount * rate,
        }
    }
}

/// A priced conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub rate: f64,
    pub result: f64,
}

impl Quote {
    /// `1 BTC = 18.742803 ETH`
    pub fn rate_line(&self) -> String {
        format!("1 {} = {:.6} {}", self.from, self.rate, self.to)
    }
}

/// Pretend to execute a conversion.
///
/// Non-positive amounts are refused. Otherwise, after `delay` the notifier
/// gets a "Conversion Successful" toast unless `cancelled` resolves first.
pub async fn submit<N: Notifier>(
    quote: &Quote,
    notifier: &N,
    delay: Duration,
    cancelled: impl Future<Output = ()>,
) -> ResultEngine<Completion> {
    if quote.amount <= 0.0 {
        return Err(EngineError::InvalidAmount(
            "conversion amount must be greater than zero".to_string(),
        ));
    }

    let completion = simulated_delay(delay, cancelled).await;
    if completion == Completion::Done {
        tracing::info!(
            from = %quote.from,
            to = %quote.to,
            amount = quote.amount,
            "conversion done"
        );
        notifier.notify(Toast::new(
            "Conversion Successful",
            format!(
                "{:.6} {} converted to {:.6} {}",
                quote.amount, quote.from, quote.result, quote.to
            ),
        ));
    }
    Ok(completion)
}
