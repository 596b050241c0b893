use clap::Parser;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use storefront::application::engine::PaymentOrchestrator;
use storefront::application::session::Session;
use storefront::config::StoreConfig;
use storefront::domain::money::{Currency, ExchangeRate};
use storefront::domain::ports::NotifierBox;
use storefront::domain::storefront::Storefront;
use storefront::infrastructure::file::FileNotifier;
use storefront::infrastructure::in_memory::SharedStorefront;
use storefront::infrastructure::log::LogNotifier;
use storefront::interfaces::csv::catalog_reader::CatalogReader;
use storefront::interfaces::csv::order_writer::OrderWriter;
use storefront::interfaces::csv::session_reader::SessionReader;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Catalog CSV file
    catalog: PathBuf,

    /// Session CSV file with the shopper's actions
    session: PathBuf,

    /// JSON settings file (optional). Missing fields fall back to defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Display currency at startup (INR or USD)
    #[arg(long)]
    currency: Option<Currency>,

    /// Rupees per US dollar
    #[arg(long)]
    rate: Option<Decimal>,

    /// Write notices as .eml files into this directory instead of logging them
    #[arg(long)]
    outbox_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal()),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => StoreConfig::load(path)?,
        None => StoreConfig::default(),
    };
    if let Some(currency) = cli.currency {
        config.display_currency = currency;
    }
    if let Some(rate) = cli.rate {
        config.exchange_rate = ExchangeRate::new(rate)?;
    }

    let catalog = CatalogReader::new(File::open(&cli.catalog).into_diagnostic()?).read_catalog()?;
    tracing::info!(items = catalog.len(), "Catalog loaded");

    let notifier: NotifierBox = match cli.outbox_dir {
        Some(dir) => Box::new(FileNotifier::new(dir, config.sender.clone())),
        None => Box::new(LogNotifier),
    };
    let orchestrator = PaymentOrchestrator::new(notifier, config.exchange_rate)
        .with_notify_timeout(config.notify_timeout());
    let store = SharedStorefront::new(Storefront::new(config.account.clone()));
    let mut session = Session::new(catalog, orchestrator, store.clone(), config.display_currency);

    let file = File::open(&cli.session).into_diagnostic()?;
    for (row, action) in SessionReader::new(file).actions().enumerate() {
        let row = row + 1;
        let action = match action {
            Ok(action) => action,
            Err(e) => {
                tracing::error!(row, error = %e, "Error reading action");
                continue;
            }
        };
        match session.apply(action).await {
            Ok(Some(outcome)) => {
                tracing::debug!(row, order = %outcome.reference, balance = %outcome.balance, "Payment settled");
            }
            Ok(None) => {}
            Err(e) => tracing::error!(row, error = %e, "Action failed"),
        }
    }

    let state = store.snapshot().await;
    let stdout = io::stdout();
    let mut writer = OrderWriter::new(stdout.lock());
    writer.write_orders(state.ledger.orders())?;

    tracing::info!(
        orders = state.ledger.orders().len(),
        balance = %state.account.balance(),
        "Session finished"
    );

    Ok(())
}
