//! Make-payment form and confirmation dialog.
//!
//! The dialog moves through `Confirm → Processing → Success`. Processing is a
//! fixed delay that always succeeds; the only way out of it early is
//! dismissing the dialog, which cancels the pending task and goes back to
//! `Confirm`.

use std::{future::Future, time::Duration};

use serde::Serialize;

use crate::{
    Currency, EngineError, Money, ResultEngine,
    notify::{Notifier, Toast},
    util::{Completion, simulated_delay},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStage {
    #[default]
    Confirm,
    Processing,
    Success,
}

/// Raw inputs of the make-payment form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentForm {
    pub amount: String,
    pub recipient: String,
    pub memo: String,
    pub currency: Currency,
}

impl PaymentForm {
    /// Check the form before opening the confirmation dialog.
    pub fn validate(&self) -> ResultEngine<PaymentRequest> {
        if !self.currency.is_payable() {
            return Err(EngineError::UnknownCurrency(format!(
                "{} cannot be used to pay",
                self.currency
            )));
        }
        let amount = Money::parse_major(&self.amount, self.currency)?;
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "payment amount must be greater than zero".to_string(),
            ));
        }
        let recipient = self.recipient.trim();
        if recipient.is_empty() {
            return Err(EngineError::InvalidAmount(
                "recipient wallet address is required".to_string(),
            ));
        }
        let memo = self.memo.trim();

        Ok(PaymentRequest {
            amount,
            currency: self.currency,
            recipient: recipient.to_string(),
            memo: (!memo.is_empty()).then(|| memo.to_string()),
        })
    }
}

/// A validated payment, ready to be confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    pub amount: Money,
    pub currency: Currency,
    pub recipient: String,
    pub memo: Option<String>,
}

/// Shorten a wallet address to `0x1234...abcd`.
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDialog {
    request: PaymentRequest,
    network_fee: Money,
    stage: PaymentStage,
}

impl PaymentDialog {
    pub fn new(request: PaymentRequest, network_fee: Money) -> Self {
        Self {
            request,
            network_fee,
            stage: PaymentStage::Confirm,
        }
    }

    pub fn stage(&self) -> PaymentStage {
        self.stage
    }

    pub fn request(&self) -> &PaymentRequest {
        &self.request
    }

    pub fn network_fee(&self) -> Money {
        self.network_fee
    }

    /// Amount plus network fee.
    pub fn total(&self) -> ResultEngine<Money> {
        self.request
            .amount
            .checked_add(self.network_fee)
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))
    }

    pub fn recipient_display(&self) -> String {
        truncate_address(&self.request.recipient)
    }

    /// `Confirm → Processing`. Any other starting stage is rejected.
    pub fn confirm(&mut self) -> ResultEngine<()> {
        if self.stage != PaymentStage::Confirm {
            return Err(EngineError::InvalidTransition(format!(
                "cannot confirm a payment in the {:?} stage",
                self.stage
            )));
        }
        self.stage = PaymentStage::Processing;
        Ok(())
    }

    /// Dismiss the dialog. It always reopens in `Confirm`.
    pub fn close(&mut self) {
        self.stage = PaymentStage::Confirm;
    }

    /// Confirm the payment and run the simulated processing.
    ///
    /// Resolves to `Success` after `delay`, emitting a "Payment Successful"
    /// toast. If `dismissed` resolves first the dialog goes back to `Confirm`
    /// and nothing is emitted.
    pub async fn process<N: Notifier>(
        &mut self,
        notifier: &N,
        delay: Duration,
        dismissed: impl Future<Output = ()>,
    ) -> ResultEngine<PaymentStage> {
        self.confirm()?;
        tracing::debug!(recipient = %self.recipient_display(), "processing payment");

        match simulated_delay(delay, dismissed).await {
            Completion::Done => {
                self.stage = PaymentStage::Success;
                // Symbol plus the shortest amount, so `10` reads `$10`.
                let currency = self.request.currency;
                let plain = self.request.amount.plain(currency);
                let amount = format!("{}{plain}", currency.symbol());
                tracing::info!(%amount, "payment sent");
                notifier.notify(Toast::new(
                    "Payment Successful",
                    format!("{amount} was sent successfully"),
                ));
            }
            Completion::Cancelled => {
                tracing::debug!("payment dismissed while processing");
                self.close();
            }
        }
        Ok(self.stage)
    }
}
