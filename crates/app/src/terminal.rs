//! Plain-text rendering of engine values.

use engine::{
    Currency, Money, Notifier, Portfolio, RateTable, SplitSession, Toast, ToastVariant,
    Transaction, payment::PaymentDialog, portfolio::signed_percent,
};

/// Prints toasts on the terminal and mirrors them in the log.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, toast: Toast) {
        tracing::info!(title = %toast.title, "toast");
        match toast.variant {
            ToastVariant::Default => println!("[{}] {}", toast.title, toast.description),
            ToastVariant::Destructive => eprintln!("[{}] {}", toast.title, toast.description),
        }
    }
}

pub fn portfolio(portfolio: &Portfolio) -> String {
    let mut out = format!(
        "Total Balance  {}  ({})\n\nYour Assets\n",
        portfolio.balance.format(portfolio.currency),
        portfolio.weekly_change_label()
    );
    for token in &portfolio.tokens {
        out.push_str(&format!(
            "  {:<10} {:>12} {:>5}  {:>12}  {:>7}\n",
            token.currency.name(),
            token.amount.plain(token.currency),
            token.currency.code(),
            token.value.format(portfolio.currency),
            signed_percent(token.change, 1)
        ));
    }
    out
}

pub fn transactions(transactions: &[&Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found\n".to_string();
    }
    let mut out = String::new();
    for tx in transactions {
        out.push_str(&format!(
            "  {}  {:<10} {:<22} {:>10}  {:?}\n",
            tx.date.format("%b %d, %Y"),
            format!("{:?}", tx.kind).to_lowercase(),
            tx.title,
            tx.amount.format(tx.currency),
            tx.status
        ));
    }
    out
}

/// Home screen list under the balance card.
pub fn recent_transactions(recent: &[Transaction]) -> String {
    let shown: Vec<&Transaction> = recent.iter().collect();
    format!("\nRecent Transactions\n{}", transactions(&shown))
}

/// Reference rates panel of the convert screen.
pub fn rates(table: &RateTable) -> String {
    let mut out = "Live Exchange Rates\n".to_string();
    for entry in table.entries() {
        let usd = Money::new((entry.usd * 100.0).round() as i64);
        out.push_str(&format!(
            "  {:<10} {:>5}  {:>12}\n",
            entry.currency.name(),
            entry.currency.code(),
            usd.format(Currency::Usd)
        ));
    }
    out
}

pub fn split(session: &SplitSession) -> String {
    let description = if session.description().is_empty() {
        "Split"
    } else {
        session.description()
    };
    let mut out = format!(
        "{description}: ${} ({:?} split)\n",
        session.total_input(),
        session.mode()
    );
    for p in session.participants() {
        out.push_str(&format!(
            "  {:<16} {:>7.2}%  ${:>10.2}\n",
            p.name(),
            p.percentage(),
            p.amount()
        ));
    }
    out
}

pub fn payment(dialog: &PaymentDialog) -> String {
    let request = dialog.request();
    let currency = request.currency;
    let total = dialog
        .total()
        .map(|total| total.format(currency))
        .unwrap_or_else(|err| err.to_string());
    let mut out = format!(
        "Confirm Payment\n  Amount       {}\n  Recipient    {}\n  Network Fee  {}\n  Total        {}\n",
        request.amount.format(currency),
        dialog.recipient_display(),
        dialog.network_fee().format(currency),
        total
    );
    if let Some(memo) = &request.memo {
        out.push_str(&format!("  Memo         {memo}\n"));
    }
    out
}
