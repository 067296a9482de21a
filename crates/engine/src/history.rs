//! Transaction history.
//!
//! The history screen shows sample transactions, most recent first, filtered
//! by a tab (one per [`TransactionKind`], plus "all") and a free-text search.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Currency, Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Sent,
    Received,
    Converted,
    Split,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub title: String,
    pub amount: Money,
    pub currency: Currency,
    pub date: NaiveDate,
    pub status: TransactionStatus,
}

impl Transaction {
    /// Does `query` match the title (case-insensitive) or the plain amount?
    ///
    /// The amount is matched against its shortest rendering, so `250.00`
    /// is found by `250` but not by `250.00`.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query.to_lowercase())
            || self.amount.plain(self.currency).contains(query)
    }
}

/// Tabs of the history screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryTab {
    #[default]
    All,
    Sent,
    Received,
    Converted,
    Split,
}

impl HistoryTab {
    pub fn kind(self) -> Option<TransactionKind> {
        match self {
            HistoryTab::All => None,
            HistoryTab::Sent => Some(TransactionKind::Sent),
            HistoryTab::Received => Some(TransactionKind::Received),
            HistoryTab::Converted => Some(TransactionKind::Converted),
            HistoryTab::Split => Some(TransactionKind::Split),
        }
    }
}

impl From<&str> for HistoryTab {
    /// Unknown tab names fall back to [`HistoryTab::All`].
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "sent" => HistoryTab::Sent,
            "received" => HistoryTab::Received,
            "converted" => HistoryTab::Converted,
            "split" => HistoryTab::Split,
            _ => HistoryTab::All,
        }
    }
}

/// Transactions visible in `tab` that match `query`, in their original order.
pub fn filter<'a>(
    transactions: &'a [Transaction],
    tab: HistoryTab,
    query: &str,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|tx| tab.kind().is_none_or(|kind| tx.kind == kind))
        .filter(|tx| tx.matches(query))
        .collect()
}

/// How many transactions the home screen lists.
pub const RECENT_LIMIT: usize = 4;

/// The first `limit` transactions, as shown on the home screen.
pub fn recent(transactions: &[Transaction], limit: usize) -> &[Transaction] {
    &transactions[..limit.min(transactions.len())]
}

fn sample(
    id: &str,
    kind: TransactionKind,
    title: &str,
    cents: i64,
    (year, month, day): (i32, u32, u32),
    status: TransactionStatus,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        amount: Money::new(cents),
        currency: Currency::Usd,
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        status,
    }
}

/// Sample data shown by the history and home screens.
pub fn sample_transactions() -> Vec<Transaction> {
    use TransactionKind::*;
    use TransactionStatus::*;

    vec![
        sample("1", Sent, "To Alex Williams", 25_000, (2025, 4, 8), Completed),
        sample("2", Received, "From John Smith", 12_550, (2025, 4, 7), Completed),
        sample("3", Converted, "BTC to ETH", 54_075, (2025, 4, 5), Completed),
        sample("4", Split, "Dinner with friends", 4_230, (2025, 4, 3), Pending),
        sample("5", Sent, "To Sarah Johnson", 7_500, (2025, 4, 1), Completed),
        sample("6", Received, "From Mike Thompson", 36_025, (2025, 3, 28), Completed),
        sample("7", Converted, "ETH to SOL", 29_550, (2025, 3, 25), Failed),
        sample("8", Split, "Movie tickets", 3_280, (2025, 3, 20), Completed),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(txs: &[&Transaction]) -> Vec<String> {
        txs.iter().map(|tx| tx.id.clone()).collect()
    }

    #[test]
    fn all_tab_without_query_keeps_everything_in_order() {
        let txs = sample_transactions();
        let shown = filter(&txs, HistoryTab::All, "");
        assert_eq!(ids(&shown), vec!["1", "2", "3", "4", "5", "6", "7", "8"]);
    }

    #[test]
    fn tab_filters_by_kind() {
        let txs = sample_transactions();
        assert_eq!(ids(&filter(&txs, HistoryTab::Split, "")), vec!["4", "8"]);
        assert_eq!(ids(&filter(&txs, HistoryTab::Sent, "")), vec!["1", "5"]);
    }

    #[test]
    fn search_matches_title_case_insensitively() {
        let txs = sample_transactions();
        assert_eq!(ids(&filter(&txs, HistoryTab::All, "SARAH")), vec!["5"]);
        assert_eq!(ids(&filter(&txs, HistoryTab::All, "eth")), vec!["3", "7"]);
        assert_eq!(ids(&filter(&txs, HistoryTab::Converted, "sol")), vec!["7"]);
    }

    #[test]
    fn search_matches_plain_amount() {
        let txs = sample_transactions();
        assert_eq!(ids(&filter(&txs, HistoryTab::All, "125.5")), vec!["2"]);
        assert!(filter(&txs, HistoryTab::All, "250.00").is_empty());
        assert_eq!(ids(&filter(&txs, HistoryTab::All, "250")), vec!["1"]);
    }

    #[test]
    fn unknown_tab_name_means_all() {
        assert_eq!(HistoryTab::from("Received"), HistoryTab::Received);
        assert_eq!(HistoryTab::from("bogus"), HistoryTab::All);
    }

    #[test]
    fn recent_is_bounded() {
        let txs = sample_transactions();
        assert_eq!(recent(&txs, 3).len(), 3);
        assert_eq!(recent(&txs, 50).len(), 8);
    }
}
