use std::future::Future;

use engine::{
    Completion, ConversionForm, EngineError, HistoryTab, Notifier, PaymentDialog, PaymentForm,
    PaymentStage, Portfolio, RateTable, ScanOutcome, Scanner, SplitMode, SplitSession, Toast,
    history, rates, split,
};
use uuid::Uuid;

use crate::{
    camera::SimulatedCamera,
    cli::{Command, ConvertArgs, HistoryArgs, PayArgs, SplitArgs},
    error::{AppError, Result},
    settings::Settings,
    terminal::{self, TerminalNotifier},
};

pub async fn run(command: Command, settings: &Settings) -> Result<()> {
    let notifier = TerminalNotifier;
    match command {
        Command::Balance => {
            let transactions = history::sample_transactions();
            print!("{}", terminal::portfolio(&Portfolio::sample()));
            print!(
                "{}",
                terminal::recent_transactions(history::recent(
                    &transactions,
                    history::RECENT_LIMIT
                ))
            );
            Ok(())
        }
        Command::History(args) => history_cmd(args),
        Command::Convert(args) => convert(args, settings, &notifier).await,
        Command::Pay(args) => pay(args, settings, &notifier).await,
        Command::Split(args) => split_cmd(args, settings, &notifier).await,
    }
}

/// Resolves when the user hits Ctrl-C; never resolves if the signal cannot be
/// listened to.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

fn history_cmd(args: HistoryArgs) -> Result<()> {
    let transactions = history::sample_transactions();
    let tab = HistoryTab::from(args.tab.as_str());
    let mut shown = history::filter(&transactions, tab, &args.search);
    if let Some(limit) = args.limit {
        shown.truncate(limit);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
    } else {
        print!("{}", terminal::transactions(&shown));
    }
    Ok(())
}

async fn convert<N: Notifier>(
    args: ConvertArgs,
    settings: &Settings,
    notifier: &N,
) -> Result<()> {
    let mut form = ConversionForm {
        from: args.from.to_ascii_uppercase(),
        to: args.to.to_ascii_uppercase(),
        amount: args.amount,
    };
    if args.swap {
        form = form.swap();
    }

    let table = RateTable::default();
    print!("{}", terminal::rates(&table));
    let quote = form.quote(&table);
    println!("Exchange Rate  {}", quote.rate_line());
    println!("You Receive    {:.6} {}", quote.result, quote.to);

    if rates::submit(&quote, notifier, settings.delays.conversion(), interrupted()).await?
        == Completion::Cancelled
    {
        println!("Conversion cancelled");
    }
    Ok(())
}

async fn pay<N: Notifier>(args: PayArgs, settings: &Settings, notifier: &N) -> Result<()> {
    let currency = match args.currency.as_deref() {
        Some(code) => engine::Currency::try_from(code)?,
        None => settings.payment.default_currency()?,
    };

    let recipient = match args.to {
        Some(to) => to,
        None => match scan_recipient(settings, notifier, interrupted()).await? {
            Some(address) => address,
            None => return Ok(()),
        },
    };

    let request = PaymentForm {
        amount: args.amount,
        recipient,
        memo: args.memo,
        currency,
    }
    .validate()?;
    let mut dialog = PaymentDialog::new(request, settings.payment.fee(currency)?);
    print!("{}", terminal::payment(&dialog));

    println!("Processing payment...");
    let stage = dialog
        .process(notifier, settings.delays.processing(), interrupted())
        .await?;
    if stage != PaymentStage::Success {
        println!("Payment dismissed before completion");
    }
    dialog.close();
    Ok(())
}

/// Scan a recipient address. `None` when the scan was abandoned or the
/// camera could not be used; the reason has already been shown.
async fn scan_recipient<N: Notifier>(
    settings: &Settings,
    notifier: &N,
    cancelled: impl Future<Output = ()>,
) -> Result<Option<String>> {
    let camera = SimulatedCamera::new(settings.camera.available);
    println!("Scanning QR code...");
    let scanned = Scanner::new(settings.delays.scan()).scan(&camera, cancelled).await;
    tracing::debug!(live_tracks = camera.live_tracks(), "scan finished");
    match scanned {
        Ok(ScanOutcome::Scanned(address)) => {
            println!("Scanned {address}");
            Ok(Some(address))
        }
        Ok(ScanOutcome::Cancelled) => {
            println!("Scan cancelled");
            Ok(None)
        }
        Err(EngineError::CameraUnavailable(message)) => {
            notifier.notify(Toast::destructive("Camera unavailable", message));
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

async fn split_cmd<N: Notifier>(
    args: SplitArgs,
    settings: &Settings,
    notifier: &N,
) -> Result<()> {
    let session = build_split(&args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&session)?);
    } else {
        print!("{}", terminal::split(&session));
    }

    if !session.can_submit() {
        println!("Enter a bill total above zero to send a split request");
        return Ok(());
    }
    let request = session.request()?;
    if split::send_request(&request, notifier, settings.delays.split_request(), interrupted())
        .await
        == Completion::Cancelled
    {
        println!("Split request cancelled");
    }
    Ok(())
}

fn build_split(args: &SplitArgs) -> Result<SplitSession> {
    let mut session = SplitSession::new()
        .set_total(&args.total)
        .set_description(args.description.as_str());
    while session.participants().len() < args.people {
        session = session.add_participant();
    }

    for raw in &args.names {
        let (index, name) = parse_assignment(raw)?;
        session = session.set_name(participant_id(&session, index)?, name)?;
    }

    if args.custom || !args.shares.is_empty() {
        session = session.set_mode(SplitMode::Custom);
    }
    for raw in &args.shares {
        let (index, value) = parse_assignment(raw)?;
        let percentage: f64 = value
            .trim_end_matches('%')
            .parse()
            .map_err(|_| AppError::Usage(format!("invalid percentage '{value}'")))?;
        session = session.set_percentage(participant_id(&session, index)?, percentage)?;
    }

    // Resolve every number first so removals do not shift each other.
    let removals = args
        .remove
        .iter()
        .map(|&n| one_based(n).and_then(|index| participant_id(&session, index)))
        .collect::<Result<Vec<_>>>()?;
    for id in removals {
        session = session.remove_participant(id);
    }

    Ok(session)
}

/// Split `N=VALUE` into a 0-based index and the value.
fn parse_assignment(raw: &str) -> Result<(usize, &str)> {
    let (index, value) = raw
        .split_once('=')
        .ok_or_else(|| AppError::Usage(format!("expected N=VALUE, got '{raw}'")))?;
    let index: usize = index
        .trim()
        .parse()
        .map_err(|_| AppError::Usage(format!("invalid participant number in '{raw}'")))?;
    Ok((one_based(index)?, value.trim()))
}

fn one_based(n: usize) -> Result<usize> {
    n.checked_sub(1)
        .ok_or_else(|| AppError::Usage("participants are numbered from 1".to_string()))
}

fn participant_id(session: &SplitSession, index: usize) -> Result<Uuid> {
    session
        .participants()
        .get(index)
        .map(|p| p.id())
        .ok_or_else(|| AppError::Usage(format!("there is no participant {}", index + 1)))
}
