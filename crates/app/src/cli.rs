use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "offlinepay", about = "Wallet demo: split bills, convert, pay")]
pub struct Cli {
    /// Optional settings file path (TOML, extension may be omitted).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the log level (e.g. debug, info, warn).
    #[arg(long, global = true)]
    pub level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the balance card.
    Balance,
    /// List transactions.
    History(HistoryArgs),
    /// Convert between crypto assets at the reference rates.
    Convert(ConvertArgs),
    /// Send a payment.
    Pay(PayArgs),
    /// Split a bill and send the request.
    Split(SplitArgs),
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// all, sent, received, converted or split.
    #[arg(long, default_value = "all")]
    pub tab: String,
    /// Match titles (case-insensitive) or amounts.
    #[arg(long, default_value = "")]
    pub search: String,
    /// Only show the N most recent matches.
    #[arg(long)]
    pub limit: Option<usize>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    #[arg(long)]
    pub amount: String,
    #[arg(long, default_value = "BTC")]
    pub from: String,
    #[arg(long, default_value = "ETH")]
    pub to: String,
    /// Swap the two currencies before converting.
    #[arg(long)]
    pub swap: bool,
}

#[derive(Debug, Args)]
pub struct PayArgs {
    #[arg(long)]
    pub amount: String,
    /// Recipient wallet address.
    #[arg(long, conflicts_with = "scan", required_unless_present = "scan")]
    pub to: Option<String>,
    /// Read the recipient from a (simulated) QR code.
    #[arg(long)]
    pub scan: bool,
    /// Payment currency; defaults to the configured one.
    #[arg(long)]
    pub currency: Option<String>,
    #[arg(long, default_value = "")]
    pub memo: String,
}

#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Bill total, as typed.
    #[arg(long)]
    pub total: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Number of participants (at least 2).
    #[arg(long, default_value_t = 2)]
    pub people: usize,
    /// Rename a participant: `N=Name`, 1-based.
    #[arg(long = "name", value_name = "N=NAME")]
    pub names: Vec<String>,
    /// Set a participant's share in custom mode: `N=PERCENT`, applied in order.
    #[arg(long = "share", value_name = "N=PERCENT")]
    pub shares: Vec<String>,
    /// Remove a participant, 1-based, applied after shares.
    #[arg(long = "remove", value_name = "N")]
    pub remove: Vec<usize>,
    /// Use custom mode even without `--share`.
    #[arg(long)]
    pub custom: bool,
    #[arg(long)]
    pub json: bool,
}
