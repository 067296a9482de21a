//! Balance card of the home screen.

use serde::Serialize;

use crate::{Currency, Money};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenHolding {
    pub currency: Currency,
    /// Held quantity, in the token's own minor units.
    pub amount: Money,
    /// Value in the portfolio currency.
    pub value: Money,
    /// Weekly change, in percent.
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Portfolio {
    pub currency: Currency,
    pub balance: Money,
    pub weekly_change: f64,
    pub tokens: Vec<TokenHolding>,
}

impl Portfolio {
    /// Sample wallet shown on the home screen.
    pub fn sample() -> Self {
        Self {
            currency: Currency::Usd,
            balance: Money::new(845_297),
            weekly_change: 4.5,
            tokens: vec![
                TokenHolding {
                    currency: Currency::Btc,
                    amount: Money::new(58_000_000),
                    value: Money::new(528_042),
                    change: 3.2,
                },
                TokenHolding {
                    currency: Currency::Eth,
                    amount: Money::new(460_000_000),
                    value: Money::new(245_815),
                    change: -1.8,
                },
                TokenHolding {
                    currency: Currency::Sol,
                    amount: Money::new(32_400_000_000),
                    value: Money::new(71_440),
                    change: 8.5,
                },
            ],
        }
    }

    /// Sum of the token values.
    pub fn tokens_value(&self) -> Money {
        self.tokens.iter().fold(Money::ZERO, |acc, token| acc + token.value)
    }

    /// `+4.50% this week`
    pub fn weekly_change_label(&self) -> String {
        format!("{} this week", signed_percent(self.weekly_change, 2))
    }
}

/// Percentage with an explicit `+` for non-negative values.
pub fn signed_percent(value: f64, decimals: usize) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{value:.decimals$}%")
}
